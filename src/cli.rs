//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use blop::cache::ManifestCache;
use blop::defaults::{self, CACHE_DIR_ENV};
use blop::output::OutputConfig;

use crate::commands::{self, Context};

/// blop - Scaffold new projects from manifest templates
#[derive(Parser, Debug)]
#[command(name = "blop")]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Directory holding imported templates [default: ~/.blop/cache]
    #[arg(long, global = true, value_name = "DIR", env = CACHE_DIR_ENV)]
    cache_dir: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new project from a template
    Gen(commands::gen::GenArgs),

    /// Import a template from a URL or local file
    Import(commands::import::ImportArgs),

    /// List all available templates
    List(commands::list::ListArgs),

    /// Remove a template from the cache
    Remove(commands::remove::RemoveArgs),

    /// Show the variables and files of a cached template
    Info(commands::info::InfoArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),

    /// Any other name is looked up as a cached template id
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let ctx = Context {
            cache: ManifestCache::new(
                self.cache_dir
                    .unwrap_or_else(defaults::default_cache_dir),
            ),
            output: OutputConfig::from_env_and_flag(&self.color),
        };
        log::debug!("Using template cache at {}", ctx.cache.root().display());

        match self.command {
            Commands::Gen(args) => commands::gen::execute(args, &ctx),
            Commands::Import(args) => commands::import::execute(args, &ctx),
            Commands::List(args) => commands::list::execute(args, &ctx),
            Commands::Remove(args) => commands::remove::execute(args, &ctx),
            Commands::Info(args) => commands::info::execute(args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
            Commands::External(args) => commands::run::execute(args, &ctx),
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unknown_name_is_external() {
        let cli = Cli::try_parse_from(["blop", "svc", "--output", "out"]).unwrap();
        match cli.command {
            Commands::External(args) => assert_eq!(args, vec!["svc", "--output", "out"]),
            other => panic!("expected external subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_before_command() {
        let cli =
            Cli::try_parse_from(["blop", "--cache-dir", "/tmp/c", "--color", "never", "list"])
                .unwrap();
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/c")));
        assert_eq!(cli.color, "never");
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_gen_accepts_repeated_vars() {
        let cli = Cli::try_parse_from([
            "blop", "gen", "svc", "--var", "a=1", "--var", "b=2", "--no-input",
        ])
        .unwrap();
        match cli.command {
            Commands::Gen(args) => {
                assert_eq!(args.template_id.as_deref(), Some("svc"));
                assert_eq!(args.render.vars, vec!["a=1", "b=2"]);
                assert!(args.render.no_input);
            }
            other => panic!("expected gen, got {:?}", other),
        }
    }
}

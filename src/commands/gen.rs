//! # Gen Command Implementation
//!
//! This module implements the `gen` subcommand, which renders a template into
//! an output directory.
//!
//! ## Process
//!
//! 1.  **Load**: The manifest is fetched from `--manifest` when given,
//!     otherwise read from the cache by id. Without either, the user picks
//!     one of the cached templates interactively.
//! 2.  **Resolve**: Each declared variable gets a value, from `--var`
//!     presets first and interactive prompts second.
//! 3.  **Render**: Files are expanded in manifest order and written under
//!     `--output`, or only listed with `--dry-run`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;

use blop::fetch::{Fetcher, HttpFetcher};
use blop::manifest::{self, Manifest};
use blop::materialize;
use blop::output::emoji;
use blop::render::Renderer;
use blop::resolver::{parse_assignment, resolve_all, PresetResolver};
use blop::suggestions;

use super::prompt::{self, PromptResolver};
use super::{load_cached, Context};

/// Generate a new project from a template
#[derive(Args, Debug)]
pub struct GenArgs {
    /// Id of a cached template
    #[arg(value_name = "TEMPLATE_ID")]
    pub template_id: Option<String>,

    /// URL (or path) of a manifest to render without importing it
    #[arg(long, value_name = "URL")]
    pub manifest: Option<String>,

    #[command(flatten)]
    pub render: RenderOpts,
}

/// Options shared by every command that renders a template.
#[derive(Args, Debug)]
pub struct RenderOpts {
    /// Output directory for the new project
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Set a variable instead of prompting for it (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Never prompt; unset variables use their defaults or fail
    #[arg(long)]
    pub no_input: bool,

    /// Show which files would be written without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Timeout in seconds for remote downloads
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

impl RenderOpts {
    /// Parses the `--var` assignments.
    pub fn presets(&self) -> Result<HashMap<String, String>> {
        self.vars
            .iter()
            .map(|assignment| {
                parse_assignment(assignment)
                    .ok_or_else(|| suggestions::invalid_var_assignment(assignment))
            })
            .collect()
    }

    pub fn fetcher(&self) -> Result<HttpFetcher> {
        HttpFetcher::with_timeout(Duration::from_secs(self.timeout))
            .context("Failed to initialize HTTP client")
    }
}

/// Execute the `gen` command.
pub fn execute(args: GenArgs, ctx: &Context) -> Result<()> {
    let fetcher = args.render.fetcher()?;

    let manifest = match (&args.manifest, &args.template_id) {
        (Some(url), _) => {
            let data = fetcher
                .fetch(url)
                .context("Failed to download manifest")?;
            manifest::parse(&data).context("Failed to parse manifest")?
        }
        (None, Some(id)) => load_cached(ctx, id)?,
        (None, None) => {
            let id = select_cached(ctx, &args.render)?;
            load_cached(ctx, &id)?
        }
    };

    generate(&manifest, &args.render, ctx, &fetcher)
}

/// Resolves variables and renders `manifest` as `opts` describe.
pub fn generate(
    manifest: &Manifest,
    opts: &RenderOpts,
    ctx: &Context,
    fetcher: &dyn Fetcher,
) -> Result<()> {
    let presets = opts.presets()?;

    let vars = if prompt::interactive(opts.no_input) {
        let prompter = PromptResolver::new();
        let resolver = PresetResolver::new(presets).with_fallback(&prompter);
        resolve_all(&manifest.variables, &resolver)
    } else {
        resolve_all(&manifest.variables, &PresetResolver::new(presets))
    }
    .context("Failed to prompt for variables")?;

    let renderer = Renderer::new(fetcher);

    if opts.dry_run {
        let files = renderer
            .plan(manifest, &vars)
            .context("Failed to render template")?;
        println!(
            "{} Dry run: {} file(s) would be written",
            emoji(&ctx.output, "🔍", "[DRY RUN]"),
            files.len()
        );
        for file in &files {
            let target = materialize::target_path(&opts.output, &file.path);
            println!("  {}", ctx.output.dim(&target.display().to_string()));
        }
        return Ok(());
    }

    let report = renderer
        .render(manifest, &opts.output, &vars)
        .context("Failed to render template")?;

    println!(
        "{} {}",
        emoji(&ctx.output, "✅", "[OK]"),
        ctx.output.success(&format!(
            "Generated {} file(s) from '{}' in {}",
            report.len(),
            manifest.display_name(),
            opts.output.display()
        ))
    );
    Ok(())
}

fn select_cached(ctx: &Context, opts: &RenderOpts) -> Result<String> {
    let ids = ctx.cache.list().context("Failed to list templates")?;
    if ids.is_empty() {
        return Err(suggestions::no_templates_cached());
    }
    if !prompt::interactive(opts.no_input) {
        return Err(suggestions::interaction_required("a template"));
    }
    prompt::select_template(&ids)
}

//! Rendering a cached template by naming it as the command.
//!
//! `blop svc --output out` is shorthand for `blop gen svc --output out`.
//! This is the last routing step: clap hands over any name that is not a
//! built-in subcommand, and only a cache hit turns it into a render.

use anyhow::{Context as _, Result};
use clap::Parser;

use blop::error::Error;
use blop::manifest;
use blop::output::emoji;
use blop::suggestions;

use super::gen::{generate, RenderOpts};
use super::Context;

/// Flags accepted after a template id.
#[derive(Parser, Debug)]
#[command(name = "blop", no_binary_name = true)]
struct RunArgs {
    /// Id of a cached template
    template_id: String,

    #[command(flatten)]
    render: RenderOpts,
}

/// Execute a cached template named on the command line.
///
/// `args[0]` is the name the user typed; the rest are render flags.
pub fn execute(args: Vec<String>, ctx: &Context) -> Result<()> {
    let name = args.first().map(String::as_str).unwrap_or_default();

    let data = match ctx.cache.get(name) {
        Ok(data) => data,
        Err(Error::NotFound { .. } | Error::Cache { .. }) => {
            return Err(suggestions::unknown_command(name));
        }
        Err(e) => return Err(e).context("Failed to get template from cache"),
    };

    // Help and usage errors exit the way clap would for a real subcommand
    let run = match RunArgs::try_parse_from(&args) {
        Ok(run) => run,
        Err(e) => e.exit(),
    };
    let manifest = manifest::parse(&data)
        .with_context(|| format!("Failed to parse manifest for '{}'", run.template_id))?;

    let fetcher = run.render.fetcher()?;
    generate(&manifest, &run.render, ctx, &fetcher)?;
    if run.render.dry_run {
        return Ok(());
    }

    println!(
        "{} Project generated using template '{}'",
        emoji(&ctx.output, "🎉", "[OK]"),
        run.template_id
    );
    Ok(())
}

//! # Import Command Implementation
//!
//! This module implements the `import` subcommand, which stores a manifest in
//! the local template cache under its `id`.
//!
//! The raw bytes are cached exactly as read, after checking that they parse
//! and carry a non-empty id.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;

use blop::fetch::{Fetcher, HttpFetcher};
use blop::manifest;
use blop::suggestions;

use super::Context;

/// Import a template from a URL or local file
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// URL of the manifest to import
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Path to a local manifest file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Timeout in seconds for the download
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

/// Execute the `import` command.
pub fn execute(args: ImportArgs, ctx: &Context) -> Result<()> {
    let data = if let Some(path) = &args.file {
        fs::read(path)
            .with_context(|| format!("Failed to read local file {}", path.display()))?
    } else if let Some(url) = &args.url {
        HttpFetcher::with_timeout(Duration::from_secs(args.timeout))
            .context("Failed to initialize HTTP client")?
            .fetch(url)
            .context("Failed to download template")?
    } else {
        return Err(suggestions::import_source_missing());
    };

    let manifest = manifest::parse(&data).context("Failed to parse manifest")?;
    manifest
        .ensure_cacheable()
        .context("Failed to parse manifest")?;

    ctx.cache
        .set(&manifest.id, &data)
        .context("Failed to cache template")?;

    println!(
        "{}",
        ctx.output.success(&format!(
            "Template '{}' (ID: {}) imported successfully!",
            manifest.display_name(),
            manifest.id
        ))
    );
    Ok(())
}

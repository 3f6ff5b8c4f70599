//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `blop`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! State shared by every command (the template cache and output preferences)
//! is built once by the CLI and passed in as a [`Context`].

pub mod completions;
pub mod gen;
pub mod import;
pub mod info;
pub mod list;
pub mod prompt;
pub mod remove;
pub mod run;

use anyhow::{Context as _, Result};

use blop::cache::ManifestCache;
use blop::error::Error;
use blop::manifest::{self, Manifest};
use blop::output::OutputConfig;
use blop::suggestions;

/// Explicit state handed to every command.
pub struct Context {
    pub cache: ManifestCache,
    pub output: OutputConfig,
}

/// Loads and parses a cached manifest, turning a miss into a hint.
pub fn load_cached(ctx: &Context, id: &str) -> Result<Manifest> {
    let data = match ctx.cache.get(id) {
        Ok(data) => data,
        Err(Error::NotFound { .. }) => return Err(suggestions::template_not_cached(id)),
        Err(e) => return Err(e).context("Failed to get template from cache"),
    };
    manifest::parse(&data).with_context(|| format!("Failed to parse manifest for '{}'", id))
}

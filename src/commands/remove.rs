//! # Remove Command Implementation
//!
//! This module implements the `remove` subcommand, which deletes a template
//! from the local cache.

use anyhow::{Context as _, Result};
use clap::Args;

use blop::error::Error;
use blop::suggestions;

use super::Context;

/// Remove a template from the cache
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Id of the template to remove
    #[arg(value_name = "TEMPLATE_ID")]
    pub template_id: String,
}

/// Execute the `remove` command.
pub fn execute(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let id = &args.template_id;

    match ctx.cache.remove(id) {
        Ok(()) => {}
        Err(Error::NotFound { .. }) => return Err(suggestions::template_not_cached(id)),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to remove template '{}'", id));
        }
    }

    println!("Template '{}' removed successfully", id);
    Ok(())
}

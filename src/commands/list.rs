//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which shows the ids of all
//! imported templates.
//!
//! ## Output Formats
//!
//! - **Plain**: One id per line
//! - **Long** (`--long`): Each entry is parsed and shown with its name and
//!   description. Entries that no longer parse are reported inline.
//! - **JSON** (`--json`): An array of ids, or of objects with `--long`

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;

use blop::manifest;

use super::Context;

/// List all available templates
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also show each template's name and description
    #[arg(short, long)]
    pub long: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// A cached template as shown by `list --long`.
#[derive(Debug, Serialize)]
struct Entry {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, ctx: &Context) -> Result<()> {
    let ids = ctx.cache.list().context("Failed to list templates")?;

    if args.json {
        let json = if args.long {
            let entries: Vec<Entry> = ids.iter().map(|id| describe(ctx, id)).collect();
            serde_json::to_string_pretty(&entries)?
        } else {
            serde_json::to_string_pretty(&ids)?
        };
        println!("{}", json);
        return Ok(());
    }

    if ids.is_empty() {
        println!("No templates found.");
        return Ok(());
    }

    println!("Available templates:");
    for id in &ids {
        if !args.long {
            println!("- {}", id);
            continue;
        }

        let entry = describe(ctx, id);
        match (&entry.error, &entry.name) {
            (Some(error), _) => {
                println!("- {} {}", id, ctx.output.dim(&format!("(unreadable: {})", error)))
            }
            (None, Some(name)) if name != id => println!("- {}: {}", id, name),
            _ => println!("- {}", id),
        }
        if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {}", ctx.output.dim(description));
        }
    }

    Ok(())
}

fn describe(ctx: &Context, id: &str) -> Entry {
    let parsed = ctx
        .cache
        .get(id)
        .and_then(|data| manifest::parse(&data));

    match parsed {
        Ok(manifest) => Entry {
            id: id.to_string(),
            name: Some(manifest.display_name().to_string()),
            description: Some(manifest.description),
            error: None,
        },
        Err(e) => Entry {
            id: id.to_string(),
            name: None,
            description: None,
            error: Some(e.to_string()),
        },
    }
}

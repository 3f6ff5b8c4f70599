//! # Info Command Implementation
//!
//! This module implements the `info` subcommand, which describes a cached
//! template without rendering it.
//!
//! ## Functionality
//!
//! - **Overview**: Name, id and description
//! - **Variables**: Kind, default and the options of select variables
//! - **Files**: Each path template and where its body comes from
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use blop::manifest::{FileSpec, Manifest, VariableKind};
use blop::output::{emoji, OutputConfig};

use super::{load_cached, Context};

/// Show the variables and files of a cached template
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Id of a cached template
    #[arg(value_name = "TEMPLATE_ID")]
    pub template_id: String,
}

/// Execute the `info` command.
pub fn execute(args: InfoArgs, ctx: &Context) -> Result<()> {
    let manifest = load_cached(ctx, &args.template_id)?;
    display_info(&manifest, &ctx.output);
    Ok(())
}

fn display_info(manifest: &Manifest, output: &OutputConfig) {
    println!(
        "{} Template: {} (ID: {})",
        emoji(output, "📋", "*"),
        manifest.display_name(),
        manifest.id
    );
    if !manifest.description.is_empty() {
        println!("   {}", output.dim(&manifest.description));
    }

    println!();
    if manifest.variables.is_empty() {
        println!("Variables: none");
    } else {
        println!("Variables ({}):", manifest.variables.len());
        for (name, variable) in &manifest.variables {
            match variable.kind {
                VariableKind::Select => {
                    println!("  {} (select)", name);
                    if variable.options.is_empty() {
                        println!("    {}", output.dim("no options"));
                    }
                    for option in &variable.options {
                        println!("    - {} = {}", option.name, option.value);
                    }
                }
                VariableKind::Input => match variable.default_value() {
                    Some(default) => println!("  {} (input, default: {})", name, default),
                    None => println!("  {} (input)", name),
                },
            }
        }
    }

    println!();
    println!("Files ({}):", manifest.files.len());
    for file in &manifest.files {
        println!("  {} {}", file.path, output.dim(&body_origin(file)));
    }
}

fn body_origin(file: &FileSpec) -> String {
    match (file.inline_content(), file.remote_source()) {
        (Some(_), _) => "(inline)".to_string(),
        (None, Some(source)) => format!("(from {})", source),
        (None, None) => "(no content)".to_string(),
    }
}

//! # Error Suggestions
//!
//! Helpers for user-facing errors that say what went wrong AND how to fix
//! it. Commands return these instead of bare `anyhow::bail!` messages.
//!
//! ```rust,ignore
//! use blop::suggestions;
//!
//! return Err(suggestions::unknown_command("svc"));
//! ```

/// Generate an error for a name that is neither a command nor a cached
/// template id.
pub fn unknown_command(name: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "unknown command '{name}'. Run 'blop --help' for usage\n\n\
         hint: Run 'blop list' to see cached templates\n\
         hint: Run 'blop import <URL>' to add a template named '{name}'"
    )
}

/// Generate an error for a template id that is not in the cache.
pub fn template_not_cached(id: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Template '{id}' is not in the cache\n\n\
         hint: Run 'blop list' to see cached templates\n\
         hint: Run 'blop import <URL>' or 'blop import -f <FILE>' to add it\n\
         hint: Use 'blop gen --manifest <URL>' to render without caching"
    )
}

/// Generate an error for `import` without a source.
pub fn import_source_missing() -> anyhow::Error {
    anyhow::anyhow!(
        "please provide either a URL or a local file using the -f flag\n\n\
         hint: blop import https://example.com/template.yaml\n\
         hint: blop import -f ./template.yaml"
    )
}

/// Generate an error for interactive template selection on an empty cache.
pub fn no_templates_cached() -> anyhow::Error {
    anyhow::anyhow!(
        "no templates found. Please import a template first\n\n\
         hint: Run 'blop import <URL>' to add a template\n\
         hint: Use 'blop gen --manifest <URL>' to render without caching"
    )
}

/// Generate an error for when a prompt is needed but there is no terminal.
pub fn interaction_required(what: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "cannot prompt for {what}: no interactive terminal (or --no-input given)\n\n\
         hint: Pass the template id explicitly, e.g. 'blop gen <TEMPLATE_ID>'\n\
         hint: Pass variables with --var NAME=VALUE"
    )
}

/// Generate an error for a malformed `--var` argument.
pub fn invalid_var_assignment(assignment: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "invalid variable assignment '{assignment}'\n\n\
         hint: Use the form --var NAME=VALUE, e.g. --var name=my-service"
    )
}

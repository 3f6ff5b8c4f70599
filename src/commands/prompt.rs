//! Interactive prompts backed by `dialoguer`.
//!
//! [`PromptResolver`] is the terminal implementation of the library's
//! [`VariableResolver`] capability. Commands only reach for it when both
//! stdin and stderr are terminals and `--no-input` was not given.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use blop::error::Result as BlopResult;
use blop::manifest::{Variable, VariableKind};
use blop::resolver::{accept, ensure_choices, resolution_error, VariableResolver};

/// Whether prompting is possible and allowed.
pub fn interactive(no_input: bool) -> bool {
    !no_input && std::io::stdin().is_terminal() && console::user_attended_stderr()
}

/// Asks the user for each variable.
pub struct PromptResolver {
    theme: ColorfulTheme,
}

impl PromptResolver {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn select(&self, name: &str, variable: &Variable) -> BlopResult<String> {
        ensure_choices(name, variable)?;

        let items = variable.option_names();
        let index = Select::with_theme(&self.theme)
            .with_prompt(format!("Choose {}", name))
            .items(&items)
            .default(0)
            .interact()
            .map_err(|e| resolution_error(name, e.to_string()))?;

        // Index into options so duplicate display names still map correctly
        Ok(variable.options[index].value.clone())
    }

    fn input(&self, name: &str, variable: &Variable) -> BlopResult<String> {
        let has_default = variable.default_value().is_some();
        let label = name.to_string();

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("Enter {}", name))
            .allow_empty(true)
            .validate_with(move |value: &String| check_input(&label, value, has_default));
        if let Some(default) = variable.default_value() {
            input = input.default(default.to_string());
        }

        let value = input
            .interact_text()
            .map_err(|e| resolution_error(name, e.to_string()))?;
        accept(name, variable, Some(&value))
    }
}

impl Default for PromptResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableResolver for PromptResolver {
    fn resolve(&self, name: &str, variable: &Variable) -> BlopResult<String> {
        match variable.kind {
            VariableKind::Select => self.select(name, variable),
            VariableKind::Input => self.input(name, variable),
        }
    }
}

/// Empty input is only accepted when a default will stand in for it.
fn check_input(name: &str, value: &str, has_default: bool) -> std::result::Result<(), String> {
    if value.is_empty() && !has_default {
        Err(format!("{} cannot be empty", name))
    } else {
        Ok(())
    }
}

/// Lets the user pick one of the cached template ids.
pub fn select_template(ids: &[String]) -> Result<String> {
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a template")
        .items(ids)
        .default(0)
        .interact()
        .context("Failed to select template")?;
    Ok(ids[index].clone())
}

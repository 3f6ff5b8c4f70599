//! # Variable Resolution
//!
//! Before a manifest can be rendered, every declared variable needs a
//! concrete string value. Where those values come from is a policy of the
//! caller, so this module only defines the [`VariableResolver`] contract and
//! a few headless implementations:
//!
//! - [`StaticResolver`]: a fixed name to value mapping, for tests and for
//!   scripted use.
//! - [`PresetResolver`]: preset values (e.g. from `--var name=value`) layered
//!   over an optional fallback resolver, typically an interactive prompt.
//!
//! Both enforce the same rules as an interactive prompt would:
//!
//! - A `select` variable always resolves to one of its option *values*. A
//!   select variable with no options cannot be resolved.
//! - A free-text variable resolves to the given input, or to its default when
//!   the input is empty. Empty input without a default is an error.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::error::{Error, Result};
use crate::manifest::{Variable, VariableKind};

/// Turns a declared variable into a concrete value
pub trait VariableResolver {
    /// Resolve the variable `name`.
    fn resolve(&self, name: &str, variable: &Variable) -> Result<String>;
}

/// Resolves every declared variable, producing the substitution context used
/// for all templates of a manifest.
pub fn resolve_all(
    variables: &BTreeMap<String, Variable>,
    resolver: &dyn VariableResolver,
) -> Result<HashMap<String, String>> {
    let mut resolved = HashMap::with_capacity(variables.len());

    for (name, variable) in variables {
        let value = resolver.resolve(name, variable).map_err(|e| match e {
            Error::Resolution { .. } => e,
            other => resolution_error(name, other.to_string()),
        })?;
        debug!("Resolved variable '{}'", name);
        resolved.insert(name.clone(), value);
    }

    Ok(resolved)
}

/// Builds an [`Error::Resolution`] for `variable`.
pub fn resolution_error(variable: &str, message: impl Into<String>) -> Error {
    Error::Resolution {
        variable: variable.to_string(),
        message: message.into(),
    }
}

/// Fails when a select variable has nothing to choose from.
pub fn ensure_choices(name: &str, variable: &Variable) -> Result<()> {
    if variable.kind == VariableKind::Select && variable.options.is_empty() {
        return Err(resolution_error(name, "no options to choose from"));
    }
    Ok(())
}

/// Applies the resolution rules to a candidate value.
///
/// For select variables `input` may be an option value or an option display
/// name; the result is always the option value. For free-text variables an
/// empty or missing input falls back to the default.
pub fn accept(name: &str, variable: &Variable, input: Option<&str>) -> Result<String> {
    match variable.kind {
        VariableKind::Select => {
            ensure_choices(name, variable)?;
            let input = input.ok_or_else(|| resolution_error(name, "no option selected"))?;
            if variable.has_value(input) {
                return Ok(input.to_string());
            }
            if let Some(value) = variable.choose(input) {
                return Ok(value.to_string());
            }
            Err(resolution_error(
                name,
                format!(
                    "'{}' is not one of the options ({})",
                    input,
                    variable
                        .options
                        .iter()
                        .map(|o| o.value.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ))
        }
        VariableKind::Input => match input.filter(|s| !s.is_empty()) {
            Some(value) => Ok(value.to_string()),
            None => variable
                .default_value()
                .map(str::to_string)
                .ok_or_else(|| resolution_error(name, format!("{} cannot be empty", name))),
        },
    }
}

/// Resolves variables from a fixed mapping
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    values: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Add or replace a value
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl VariableResolver for StaticResolver {
    fn resolve(&self, name: &str, variable: &Variable) -> Result<String> {
        accept(name, variable, self.values.get(name).map(String::as_str))
    }
}

/// Preset values layered over an optional fallback resolver.
///
/// A preset value always wins. Variables without a preset go to the
/// fallback; without a fallback they resolve as [`StaticResolver`] would
/// (default or error).
pub struct PresetResolver<'a> {
    presets: HashMap<String, String>,
    fallback: Option<&'a dyn VariableResolver>,
}

impl<'a> PresetResolver<'a> {
    pub fn new(presets: HashMap<String, String>) -> Self {
        Self {
            presets,
            fallback: None,
        }
    }

    /// Ask `fallback` for variables that have no preset.
    pub fn with_fallback(mut self, fallback: &'a dyn VariableResolver) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl VariableResolver for PresetResolver<'_> {
    fn resolve(&self, name: &str, variable: &Variable) -> Result<String> {
        if let Some(preset) = self.presets.get(name) {
            return accept(name, variable, Some(preset));
        }
        match self.fallback {
            Some(fallback) => fallback.resolve(name, variable),
            None => accept(name, variable, None),
        }
    }
}

/// Parses a `name=value` assignment as given on the command line.
pub fn parse_assignment(assignment: &str) -> Option<(String, String)> {
    let (name, value) = assignment.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::SelectOption;
    use std::cell::Cell;

    fn select(options: &[(&str, &str)]) -> Variable {
        Variable {
            kind: VariableKind::Select,
            options: options
                .iter()
                .map(|(n, v)| SelectOption {
                    name: n.to_string(),
                    value: v.to_string(),
                })
                .collect(),
            default: None,
        }
    }

    fn input(default: Option<&str>) -> Variable {
        Variable {
            kind: VariableKind::Input,
            options: Vec::new(),
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn test_select_yields_option_value() {
        let var = select(&[("Python", "py"), ("Rust", "rs")]);
        assert_eq!(accept("lang", &var, Some("rs")).unwrap(), "rs");
        assert_eq!(accept("lang", &var, Some("Python")).unwrap(), "py");
    }

    #[test]
    fn test_select_rejects_unknown_choice() {
        let var = select(&[("Python", "py")]);
        match accept("lang", &var, Some("go")) {
            Err(Error::Resolution { variable, message }) => {
                assert_eq!(variable, "lang");
                assert!(message.contains("not one of the options"));
            }
            other => panic!("expected Resolution error, got {:?}", other),
        }
        assert!(accept("lang", &var, None).is_err());
    }

    #[test]
    fn test_select_without_options_fails() {
        let var = select(&[]);
        match accept("lang", &var, Some("py")) {
            Err(Error::Resolution { message, .. }) => assert!(message.contains("no options")),
            other => panic!("expected Resolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_input_default_substitution() {
        let var = input(Some("demo"));
        assert_eq!(accept("name", &var, Some("")).unwrap(), "demo");
        assert_eq!(accept("name", &var, None).unwrap(), "demo");
        assert_eq!(accept("name", &var, Some("bob")).unwrap(), "bob");
    }

    #[test]
    fn test_input_empty_without_default_fails() {
        assert!(accept("name", &input(None), Some("")).is_err());
        assert!(accept("name", &input(Some("")), Some("")).is_err());
        assert!(accept("name", &input(None), None).is_err());
    }

    #[test]
    fn test_resolve_all_with_static_resolver() {
        let mut variables = BTreeMap::new();
        variables.insert("name".to_string(), input(None));
        variables.insert("lang".to_string(), select(&[("Python", "py")]));
        variables.insert("license".to_string(), input(Some("MIT")));

        let resolver = StaticResolver::default()
            .with_value("name", "bob")
            .with_value("lang", "Python");

        let resolved = resolve_all(&variables, &resolver).unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved["name"], "bob");
        assert_eq!(resolved["lang"], "py");
        assert_eq!(resolved["license"], "MIT");
    }

    #[test]
    fn test_resolve_all_stops_at_first_failure() {
        let mut variables = BTreeMap::new();
        variables.insert("a".to_string(), input(None));

        let result = resolve_all(&variables, &StaticResolver::default());
        assert!(matches!(result, Err(Error::Resolution { variable, .. }) if variable == "a"));
    }

    struct Aborting;

    impl VariableResolver for Aborting {
        fn resolve(&self, _name: &str, _variable: &Variable) -> Result<String> {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Interrupted,
                "prompt aborted",
            )))
        }
    }

    #[test]
    fn test_resolve_all_wraps_foreign_errors() {
        let mut variables = BTreeMap::new();
        variables.insert("name".to_string(), input(None));

        match resolve_all(&variables, &Aborting) {
            Err(Error::Resolution { variable, message }) => {
                assert_eq!(variable, "name");
                assert!(message.contains("prompt aborted"));
            }
            other => panic!("expected Resolution error, got {:?}", other),
        }
    }

    struct Counting {
        calls: Cell<usize>,
    }

    impl VariableResolver for Counting {
        fn resolve(&self, name: &str, _variable: &Variable) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("asked-{}", name))
        }
    }

    #[test]
    fn test_preset_resolver_prefers_presets() {
        let fallback = Counting {
            calls: Cell::new(0),
        };
        let mut presets = HashMap::new();
        presets.insert("name".to_string(), "bob".to_string());
        let resolver = PresetResolver::new(presets).with_fallback(&fallback);

        assert_eq!(resolver.resolve("name", &input(None)).unwrap(), "bob");
        assert_eq!(fallback.calls.get(), 0);
        assert_eq!(resolver.resolve("other", &input(None)).unwrap(), "asked-other");
        assert_eq!(fallback.calls.get(), 1);
    }

    #[test]
    fn test_preset_resolver_without_fallback() {
        let resolver = PresetResolver::new(HashMap::new());
        assert_eq!(resolver.resolve("x", &input(Some("d"))).unwrap(), "d");
        assert!(resolver.resolve("y", &input(None)).is_err());
    }

    #[test]
    fn test_preset_is_validated_for_select() {
        let mut presets = HashMap::new();
        presets.insert("lang".to_string(), "cobol".to_string());
        let resolver = PresetResolver::new(presets);
        assert!(resolver
            .resolve("lang", &select(&[("Python", "py")]))
            .is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=bob"),
            Some(("name".to_string(), "bob".to_string()))
        );
        assert_eq!(
            parse_assignment("expr=a=b"),
            Some(("expr".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_assignment("empty="),
            Some(("empty".to_string(), String::new()))
        );
        assert_eq!(parse_assignment("novalue"), None);
        assert_eq!(parse_assignment("=x"), None);
    }
}

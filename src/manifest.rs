//! # Manifest Schema and Parsing
//!
//! This module defines the data structures that represent a template
//! manifest, the YAML document that describes a project template, and the
//! logic for parsing it.
//!
//! ## Document Shape
//!
//! ```yaml
//! id: svc
//! name: Service
//! description: A small service skeleton
//! variables:
//!   name:
//!     default: demo
//!   lang:
//!     type: select
//!     options:
//!       - name: Python
//!         value: py
//!       - name: Rust
//!         value: rs
//! files:
//!   - path: "{{.lang}}/README.md"
//!     content: "# {{.name}}"
//!   - path: LICENSE
//!     source: https://example.com/LICENSE
//! ```
//!
//! Every top-level key is optional and unknown keys are ignored. Parsing
//! only checks that the document is well-formed; cross-field rules such as
//! "a select variable has options" or "a file has content or a source" are
//! enforced later, by the resolver and the renderer respectively.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed template manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    /// Unique identifier, used as the cache key and as an ad-hoc command name.
    #[serde(default)]
    pub id: String,
    /// Human-readable template name.
    #[serde(default)]
    pub name: String,
    /// Free-form description shown in listings.
    #[serde(default)]
    pub description: String,
    /// Declared variables, keyed by name.
    #[serde(default)]
    pub variables: BTreeMap<String, Variable>,
    /// Output files, rendered and written in this order.
    #[serde(default)]
    pub files: Vec<FileSpec>,
}

/// How a variable is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Pick one of the declared options.
    Select,
    /// Free-text input. Any `type` other than `select` lands here.
    #[default]
    #[serde(other)]
    Input,
}

/// A declared template parameter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Variable {
    #[serde(rename = "type", default, deserialize_with = "deserialize_kind")]
    pub kind: VariableKind,
    /// Choices for a `select` variable, in display order.
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// Value used when free-text input is left empty.
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub default: Option<String>,
}

/// A (display name, value) pair offered by a `select` variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub value: String,
}

/// One output file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileSpec {
    /// Template for the output path, relative to the output directory.
    #[serde(default)]
    pub path: String,
    /// Inline template body. Takes precedence over `source` unless empty.
    #[serde(default)]
    pub content: Option<String>,
    /// Locator of a remote template body.
    #[serde(default)]
    pub source: Option<String>,
}

impl Manifest {
    /// The name to show users, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Checks that the manifest can be stored in the cache.
    pub fn ensure_cacheable(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::ManifestParse {
                message: "manifest has no 'id'; an id is required to cache it".to_string(),
            });
        }
        Ok(())
    }
}

impl FileSpec {
    /// The inline body, treating an empty string as absent.
    pub fn inline_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// The remote locator, treating a blank string as absent.
    pub fn remote_source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.trim().is_empty())
    }
}

impl Variable {
    /// The declared default, treating an empty string as absent.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }

    /// Option display names, in declaration order.
    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    /// Maps a chosen display name to its option value.
    pub fn choose(&self, display_name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == display_name)
            .map(|o| o.value.as_str())
    }

    /// Returns true if `value` is one of the declared option values.
    pub fn has_value(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Parses raw manifest bytes.
///
/// An empty document yields an empty manifest. Malformed YAML, invalid
/// UTF-8 and values of the wrong shape are reported as
/// [`Error::ManifestParse`].
pub fn parse(data: &[u8]) -> Result<Manifest> {
    let text = std::str::from_utf8(data).map_err(|e| Error::ManifestParse {
        message: format!("manifest is not valid UTF-8: {}", e),
    })?;

    let value: Value = serde_yaml::from_str(text).map_err(|e| Error::ManifestParse {
        message: e.to_string(),
    })?;

    if value.is_null() {
        return Ok(Manifest::default());
    }

    serde_yaml::from_value(value).map_err(|e| Error::ManifestParse {
        message: e.to_string(),
    })
}

/// Reads and parses a manifest from a local file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let data = std::fs::read(path)?;
    parse(&data)
}

fn deserialize_kind<'de, D>(deserializer: D) -> std::result::Result<VariableKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if s == "select" => VariableKind::Select,
        _ => VariableKind::Input,
    })
}

fn deserialize_scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_scalar(deserializer)?.unwrap_or_default())
}

fn deserialize_optional_scalar<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar value, found {:?}",
            other
        ))),
    }
}

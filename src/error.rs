//! # Error Handling
//!
//! This module defines the centralized error type for the `blop` library.
//! It uses `thiserror` to build a single `Error` enum that covers every
//! failure mode of the scaffolding pipeline, with enough context (which key,
//! which file, which variable) for the caller to present a useful message.
//!
//! ## Taxonomy
//!
//! - **`ManifestParse`**: the manifest document is not well-formed.
//! - **`NotFound`**: a cache lookup or removal targeted an absent key.
//! - **`Fetch`**: a remote manifest or file could not be retrieved.
//! - **`Resolution`**: a variable could not be resolved (aborted or invalid).
//! - **`MissingContent`**, **`Template`**, **`Render`**: failures while
//!   rendering a file. `Render` wraps the underlying cause together with the
//!   file it happened in.
//! - **`Cache`** and **`Filesystem`**: I/O failures on the cache directory or
//!   the output tree.
//!
//! Errors are never retried or swallowed inside the library; the first
//! failure aborts the operation and is returned to the caller.

use thiserror::Error;

/// Main error type for blop operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest document could not be parsed.
    #[error("Manifest parsing error: {message}")]
    ManifestParse { message: String },

    /// No cache entry exists for the given key.
    #[error("Template not found in cache: {key}")]
    NotFound { key: String },

    /// A remote manifest or file could not be retrieved.
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// A declared variable could not be resolved to a value.
    #[error("Variable resolution error for '{variable}': {message}")]
    Resolution { variable: String, message: String },

    /// A file entry declares neither inline content nor a source.
    #[error("File '{file}' has no content or source")]
    MissingContent { file: String },

    /// A template could not be parsed or executed.
    ///
    /// May include the name of the problematic variable when applicable.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        /// The template variable that caused the error, if applicable
        variable: Option<String>,
    },

    /// Rendering a single manifest file failed.
    #[error("Failed to render '{file}'")]
    Render {
        /// The file's path template, before evaluation
        file: String,
        #[source]
        source: Box<Error>,
    },

    /// An error occurred with a cache operation.
    #[error("Cache operation error: {message}")]
    Cache { message: String },

    /// An error occurred while writing to the output directory.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error with the file it occurred in.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        Error::Render {
            file: file.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through `Render` wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Render { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

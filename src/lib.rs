//! # blop
//!
//! This library scaffolds new projects from declarative manifest templates.
//! It is designed to be used by the `blop` command-line tool but can also be
//! driven headlessly, for example from tests or other tools.
//!
//! ## Quick Example
//!
//! ```
//! use blop::fetch::HttpFetcher;
//! use blop::manifest;
//! use blop::render::Renderer;
//! use blop::resolver::{resolve_all, StaticResolver};
//!
//! let manifest = manifest::parse(br#"
//! id: svc
//! variables:
//!   name: {}
//! files:
//!   - path: "{{.name}}.txt"
//!     content: "hello {{.name}}"
//! "#).unwrap();
//!
//! let resolver = StaticResolver::default().with_value("name", "bob");
//! let vars = resolve_all(&manifest.variables, &resolver).unwrap();
//!
//! let out = tempfile::tempdir().unwrap();
//! let fetcher = HttpFetcher::new().unwrap();
//! Renderer::new(&fetcher).render(&manifest, out.path(), &vars).unwrap();
//!
//! let written = std::fs::read_to_string(out.path().join("bob.txt")).unwrap();
//! assert_eq!(written, "hello bob");
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the YAML document describing a template's
//!   variables and output files.
//! - **Cache (`cache`)**: imported manifests stored by id, so they can be
//!   rendered again without a network.
//! - **Resolution (`resolver`)**: turns declared variables into values through
//!   an injected [`resolver::VariableResolver`].
//! - **Templates (`template`)**: the `{{.name}}` placeholder language used in
//!   file paths and bodies.
//! - **Rendering (`render`, `materialize`)**: expands each file's path, then
//!   its content, and writes the result under the output directory.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: read manifest bytes from the cache, a local file, or a URL.
//! 2.  **Parse**: build a [`manifest::Manifest`].
//! 3.  **Resolve**: produce a value for every declared variable.
//! 4.  **Render**: for each file in order, obtain its body (fetching remote
//!     sources), expand the path, expand the content, and write it.

pub mod cache;
pub mod defaults;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod materialize;
pub mod output;
pub mod render;
pub mod resolver;
pub mod suggestions;
pub mod template;

#[cfg(test)]
mod template_proptest;

//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and manifest
//! snippets to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_cached("svc", manifests::SVC);
//!     fixture.command().arg("list").assert().success();
//! }
//! ```
//!
//! Remote locators are `file://` URLs into the fixture directory, so no test
//! needs the network.

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Manifest documents used across tests.
#[allow(dead_code)]
pub mod manifests {
    /// One input variable, one inline file.
    pub const SVC: &str = r#"
id: svc
name: Service
description: A minimal service
variables:
  name:
    type: input
files:
  - path: "{{.name}}.txt"
    content: "hello {{.name}}"
"#;

    /// A select variable choosing the output directory.
    pub const LANG: &str = r#"
id: lang
name: Language starter
variables:
  lang:
    type: select
    options:
      - name: Python
        value: py
      - name: Go
        value: go
files:
  - path: "{{.lang}}/main.{{.lang}}"
    content: "// {{.lang}} entry point"
"#;

    /// Input variable with a default, so it renders without any `--var`.
    pub const DEFAULTED: &str = r##"
id: defaulted
name: Defaulted
variables:
  project:
    type: input
    default: demo
files:
  - path: "{{.project}}/README.md"
    content: "# {{.project}}"
"##;

    /// Valid manifest without an id.
    pub const NO_ID: &str = r#"
name: Anonymous
files: []
"#;

    /// Not a manifest at all.
    pub const INVALID_YAML: &str = "files: [unclosed";

    /// Second file has no body; the first must still be written.
    pub const MISSING_CONTENT: &str = r#"
id: broken
files:
  - path: first.txt
    content: "one"
  - path: second.txt
"#;
}

/// A temporary workspace holding a template cache, an output directory
/// and any manifest files a test needs.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Store `content` in the cache under `id`, as `import` would.
    pub fn with_cached(self, id: &str, content: &str) -> Self {
        self.temp_dir
            .child("cache")
            .child(id)
            .write_str(content)
            .expect("Failed to write cache entry");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory used as the template cache.
    pub fn cache_dir(&self) -> PathBuf {
        self.temp_dir.path().join("cache")
    }

    /// Directory projects are generated into.
    #[allow(dead_code)]
    pub fn out_dir(&self) -> PathBuf {
        self.temp_dir.path().join("out")
    }

    /// `file://` URL of a file inside the fixture.
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        url::Url::from_file_path(self.temp_dir.path().join(path))
            .expect("Temp paths are absolute")
            .to_string()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture, using its cache and plain
    /// output.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("blop");
        cmd.current_dir(self.path())
            .env("BLOP_CACHE", self.cache_dir())
            .env("NO_COLOR", "1")
            .env_remove("CLICOLOR_FORCE")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_cached() {
        let fixture = TestFixture::new().with_cached("svc", manifests::SVC);
        assert!(fixture.cache_dir().join("svc").is_file());
    }

    #[test]
    fn test_url_points_into_fixture() {
        let fixture = TestFixture::new();
        assert!(fixture.url("a.yaml").starts_with("file://"));
        assert!(fixture.url("a.yaml").ends_with("/a.yaml"));
    }

    #[test]
    fn test_manifests_are_valid_yaml() {
        let valid = [
            manifests::SVC,
            manifests::LANG,
            manifests::DEFAULTED,
            manifests::NO_ID,
            manifests::MISSING_CONTENT,
        ];

        for manifest in valid {
            serde_yaml::from_str::<serde_yaml::Value>(manifest)
                .expect("Manifest should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(manifests::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}

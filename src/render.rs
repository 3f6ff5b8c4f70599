//! # Render Engine
//!
//! Turns a parsed [`Manifest`] plus resolved variables into files on disk.
//! Each file goes through the same steps, in manifest order:
//!
//! 1.  **Body**: take the inline `content`, or fetch `source` through the
//!     injected [`Fetcher`]. A file with neither is an error.
//! 2.  **Path**: render the path template. This happens before the body is
//!     expanded because the destination itself may be parameterized, e.g.
//!     `{{.lang}}/main.ext`.
//! 3.  **Content**: render the body with the same variables.
//! 4.  **Write**: hand both to [`materialize::write`].
//!
//! The first failure aborts the render. Files written before the failing one
//! stay on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::fetch::{self, Fetcher};
use crate::manifest::{FileSpec, Manifest};
use crate::materialize;
use crate::template::Template;

/// A file after path and content expansion, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Evaluated path, relative to the output directory
    pub path: PathBuf,
    pub content: String,
}

/// Summary of a completed render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Full paths of the written files, in write order
    pub written: Vec<PathBuf>,
}

impl RenderReport {
    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// Renders manifests, fetching remote file bodies through a [`Fetcher`].
pub struct Renderer<'a> {
    fetcher: &'a dyn Fetcher,
}

impl<'a> Renderer<'a> {
    pub fn new(fetcher: &'a dyn Fetcher) -> Self {
        Self { fetcher }
    }

    /// Renders every file of `manifest` into `output_dir`.
    pub fn render(
        &self,
        manifest: &Manifest,
        output_dir: &Path,
        vars: &HashMap<String, String>,
    ) -> Result<RenderReport> {
        info!(
            "Rendering template '{}' ({} files) into {}",
            manifest.id,
            manifest.files.len(),
            output_dir.display()
        );

        let mut report = RenderReport::default();
        for spec in &manifest.files {
            let rendered = self.render_file(spec, vars)?;
            let written = materialize::write(output_dir, &rendered.path, &rendered.content)
                .map_err(|e| e.in_file(&spec.path))?;
            report.written.push(written);
        }

        Ok(report)
    }

    /// Renders every file in memory without writing anything.
    pub fn plan(
        &self,
        manifest: &Manifest,
        vars: &HashMap<String, String>,
    ) -> Result<Vec<RenderedFile>> {
        manifest
            .files
            .iter()
            .map(|spec| self.render_file(spec, vars))
            .collect()
    }

    /// Expands one file's path and content.
    pub fn render_file(
        &self,
        spec: &FileSpec,
        vars: &HashMap<String, String>,
    ) -> Result<RenderedFile> {
        let wrap = |e: Error| e.in_file(&spec.path);

        let body = self.body(spec).map_err(wrap)?;

        let path = Template::parse(&spec.path)
            .and_then(|t| t.render(vars))
            .map_err(wrap)?;
        if path.trim().is_empty() {
            return Err(wrap(Error::Template {
                message: "path evaluated to an empty string".to_string(),
                variable: None,
            }));
        }
        debug!("Path '{}' evaluated to '{}'", spec.path, path);

        let content = Template::parse(&body)
            .and_then(|t| t.render(vars))
            .map_err(wrap)?;

        Ok(RenderedFile {
            path: PathBuf::from(path),
            content,
        })
    }

    fn body(&self, spec: &FileSpec) -> Result<String> {
        if let Some(content) = spec.inline_content() {
            return Ok(content.to_string());
        }

        match spec.remote_source() {
            Some(source) => {
                debug!("Fetching body of '{}' from {}", spec.path, source);
                let data = self.fetcher.fetch(source)?;
                fetch::decode_text(source, data)
            }
            None => Err(Error::MissingContent {
                file: spec.path.clone(),
            }),
        }
    }
}

//! Writing rendered files to disk
//!
//! The last step of a render: join the evaluated relative path onto the
//! output directory, create any missing parent directories, and write the
//! content, silently replacing whatever was there before.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::info;

use crate::error::{Error, Result};

/// Writes `content` to `output_dir/relative_path` and returns the full path.
///
/// Root and drive prefixes of `relative_path` are dropped, so an absolute
/// path still lands inside `output_dir`.
pub fn write(output_dir: &Path, relative_path: &Path, content: &str) -> Result<PathBuf> {
    let full_path = target_path(output_dir, relative_path);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
            message: format!("Failed to create directory '{}': {}", parent.display(), e),
        })?;
    }

    fs::write(&full_path, content).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", full_path.display(), e),
    })?;

    info!("Wrote {} ({} bytes)", full_path.display(), content.len());
    Ok(full_path)
}

/// Where `relative_path` ends up under `output_dir`.
pub fn target_path(output_dir: &Path, relative_path: &Path) -> PathBuf {
    output_dir.join(strip_root(relative_path))
}

fn strip_root(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}

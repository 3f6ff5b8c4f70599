//! On-disk cache of imported manifests
//!
//! The cache is a flat directory: one file per template, named after the
//! manifest id and holding the manifest bytes exactly as they were imported.
//! There is no locking, no expiry and no size bound. Entries live until
//! they are explicitly removed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Error, Result};

/// Keyed byte store rooted at a directory
#[derive(Debug, Clone)]
pub struct ManifestCache {
    root: PathBuf,
}

impl ManifestCache {
    /// Create a cache rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the cache entries
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the bytes stored under `key`
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(key)?;
        match fs::read(&path) {
            Ok(data) => {
                debug!("Cache hit for '{}' ({} bytes)", key, data.len());
                Ok(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(Error::Cache {
                message: format!("Failed to read '{}' from {}: {}", key, path.display(), e),
            }),
        }
    }

    /// Store `data` under `key`, replacing any previous entry
    pub fn set(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.entry_path(key)?;

        fs::create_dir_all(&self.root).map_err(|e| Error::Cache {
            message: format!(
                "Failed to create cache directory '{}': {}",
                self.root.display(),
                e
            ),
        })?;

        if path.exists() {
            warn!("Replacing cached template '{}'", key);
        }

        fs::write(&path, data).map_err(|e| Error::Cache {
            message: format!("Failed to write '{}' to {}: {}", key, path.display(), e),
        })?;

        info!("Cached template '{}' at {}", key, path.display());
        Ok(())
    }

    /// Delete the entry stored under `key`
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed cached template '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(Error::Cache {
                message: format!("Failed to remove '{}' at {}: {}", key, path.display(), e),
            }),
        }
    }

    /// Check whether an entry exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).map(|p| p.is_file()).unwrap_or(false)
    }

    /// List all stored keys in lexicographic order.
    ///
    /// A cache directory that does not exist yet holds zero entries.
    /// Subdirectories and non-UTF-8 names are skipped.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::Cache {
                    message: format!(
                        "Failed to read cache directory '{}': {}",
                        self.root.display(),
                        e
                    ),
                })
            }
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::Cache {
                message: format!(
                    "Failed to read cache directory '{}': {}",
                    self.root.display(),
                    e
                ),
            })?;

            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => keys.push(name),
                Err(name) => debug!("Skipping non UTF-8 cache entry {:?}", name),
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Keys are used verbatim as file names, so they must name a single entry
/// directly under the cache root.
fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0');

    if invalid {
        return Err(Error::Cache {
            message: format!("Invalid template id '{}': must be a plain file name", key),
        });
    }
    Ok(())
}

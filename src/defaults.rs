//! Default values for blop configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Environment variable that overrides the cache directory.
pub const CACHE_DIR_ENV: &str = "BLOP_CACHE";

/// Returns the default cache directory, `~/.blop/cache`.
///
/// Falls back to `.blop-cache` in the current directory if the home
/// directory cannot be determined.
///
/// This can be overridden by the `--cache-dir` CLI flag or the
/// `BLOP_CACHE` environment variable.
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".blop").join("cache"))
        .unwrap_or_else(|| PathBuf::from(".blop-cache"))
}

//! # Remote Content Retrieval
//!
//! Manifests and individual file bodies can live behind a URL. The rest of
//! the library never talks to the network directly; it goes through the
//! [`Fetcher`] trait so the transport can be swapped out, which is how the
//! tests exercise remote sources without a network.
//!
//! [`HttpFetcher`] is the default implementation. It understands:
//!
//! - `http://` and `https://` URLs, fetched with a blocking `reqwest` client.
//! - `file://` URLs and bare filesystem paths, read from local disk.

use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use url::Url;

use crate::error::{Error, Result};

/// Default timeout for HTTP requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves raw bytes from a locator
pub trait Fetcher {
    /// Fetches the bytes behind `locator`.
    fn fetch(&self, locator: &str) -> Result<Vec<u8>>;
}

/// The default `Fetcher`, backed by `reqwest` for HTTP(S) and the local
/// filesystem for `file://` URLs and paths.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher whose HTTP requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("blop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Fetch {
                url: String::new(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>> {
        let fetch_error = |message: String| Error::Fetch {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP status {}", status)));
        }

        let bytes = response.bytes().map_err(|e| fetch_error(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>> {
        debug!("Fetching {}", locator);
        match Locator::parse(locator)? {
            Locator::Http(url) => self.fetch_http(&url),
            Locator::Local(path) => std::fs::read(&path).map_err(|e| Error::Fetch {
                url: locator.to_string(),
                message: format!("Failed to read {}: {}", path.display(), e),
            }),
        }
    }
}

/// Where a locator points.
#[derive(Debug, PartialEq, Eq)]
enum Locator {
    Http(String),
    Local(PathBuf),
}

impl Locator {
    fn parse(locator: &str) -> Result<Self> {
        let locator = locator.trim();
        if locator.is_empty() {
            return Err(Error::Fetch {
                url: String::new(),
                message: "empty locator".to_string(),
            });
        }

        if locator.starts_with("http://") || locator.starts_with("https://") {
            return Ok(Locator::Http(locator.to_string()));
        }

        if locator.starts_with("file://") {
            let url = Url::parse(locator).map_err(|e| Error::Fetch {
                url: locator.to_string(),
                message: format!("Invalid file URL: {}", e),
            })?;
            let path = url.to_file_path().map_err(|_| Error::Fetch {
                url: locator.to_string(),
                message: "file URL does not name a local path".to_string(),
            })?;
            return Ok(Locator::Local(path));
        }

        if let Ok(url) = Url::parse(locator) {
            // Single-letter schemes are Windows drive letters, not URLs.
            if url.scheme().len() > 1 {
                return Err(Error::Fetch {
                    url: locator.to_string(),
                    message: format!("Unsupported URL scheme '{}'", url.scheme()),
                });
            }
        }

        Ok(Locator::Local(PathBuf::from(locator)))
    }
}

/// Decodes fetched bytes as a UTF-8 template body.
pub fn decode_text(locator: &str, data: Vec<u8>) -> Result<String> {
    String::from_utf8(data).map_err(|e| Error::Fetch {
        url: locator.to_string(),
        message: format!("content is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_locator_http() {
        assert_eq!(
            Locator::parse("https://example.com/m.yaml").unwrap(),
            Locator::Http("https://example.com/m.yaml".to_string())
        );
        assert_eq!(
            Locator::parse("http://localhost:8080/x").unwrap(),
            Locator::Http("http://localhost:8080/x".to_string())
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_locator_file_url() {
        assert_eq!(
            Locator::parse("file:///tmp/manifest.yaml").unwrap(),
            Locator::Local(PathBuf::from("/tmp/manifest.yaml"))
        );
    }

    #[test]
    fn test_locator_bare_path() {
        assert_eq!(
            Locator::parse("templates/manifest.yaml").unwrap(),
            Locator::Local(PathBuf::from("templates/manifest.yaml"))
        );
    }

    #[test]
    fn test_locator_unsupported_scheme() {
        let result = Locator::parse("ftp://example.com/m.yaml");
        match result {
            Err(Error::Fetch { message, .. }) => assert!(message.contains("ftp")),
            other => panic!("expected Fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_locator_empty() {
        assert!(matches!(Locator::parse("  "), Err(Error::Fetch { .. })));
    }

    #[test]
    fn test_fetch_local_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("body.txt");
        std::fs::write(&path, "hello {{.name}}").unwrap();

        let fetcher = HttpFetcher::new().unwrap();
        let data = fetcher.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(data, b"hello {{.name}}");

        let url = Url::from_file_path(&path).unwrap();
        let data = fetcher.fetch(url.as_str()).unwrap();
        assert_eq!(data, b"hello {{.name}}");
    }

    #[test]
    fn test_fetch_missing_local_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch(path.to_str().unwrap());
        assert!(matches!(result, Err(Error::Fetch { .. })));
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text("x", b"abc".to_vec()).unwrap(), "abc");
        assert!(matches!(
            decode_text("x", vec![0xff, 0xfe]),
            Err(Error::Fetch { .. })
        ));
    }
}

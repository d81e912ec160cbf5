//! Error types with actionable suggestions.
//!
//! Only [`Error::InvalidUrl`], [`Error::Classification`] and manifest write
//! failures ([`Error::Io`]) ever reach the user as fatal conditions. A
//! [`RequestError`] is recoverable wherever it occurs: probes treat it as "no
//! match", normalizers as "no emoji", the downloader as "skip this file".

use std::path::PathBuf;

use thiserror::Error;

/// A failed HTTP exchange.
///
/// Connection-level failures and non-200 responses are both represented here
/// and are treated identically for control flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The server answered with a non-200 status code.
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body could not be decoded as expected.
    #[error("invalid response body: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid instance URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not identify the software running on {0}")]
    Classification(String),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// A hint telling the user what to try next.
    pub fn suggestion(&self) -> String {
        match self {
            Error::InvalidUrl { .. } => {
                "Pass the instance domain (e.g. mastodon.social) or an http(s):// URL".into()
            }
            Error::Classification(url) => format!(
                "Check that {} is reachable and runs Mastodon, Pleroma/Akkoma or Misskey",
                url
            ),
            Error::Request(RequestError::Status(_)) => {
                "The server may be blocking scrapers; try again later".into()
            }
            Error::Request(_) => "Check your network connection and try again".into(),
            Error::Io { path, .. } => format!(
                "Check that {} is writable and not used by another file",
                path.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_message_contains_input() {
        let err = Error::invalid_url("ftp://example.com", "unsupported scheme 'ftp'");
        let msg = err.to_string();
        assert!(msg.contains("ftp://example.com"));
        assert!(msg.contains("unsupported scheme"));
        assert!(err.suggestion().contains("http(s)://"));
    }

    #[test]
    fn test_classification_suggestion_names_url() {
        let err = Error::Classification("https://example.com".into());
        assert!(err.suggestion().contains("https://example.com"));
    }

    #[test]
    fn test_request_error_converts_transparently() {
        let err: Error = RequestError::Status(403).into();
        assert_eq!(err.to_string(), "server returned HTTP 403");
        assert!(err.suggestion().contains("try again later"));
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let err = Error::io(
            "/tmp/out/pack.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out/pack.json"));
        assert!(err.suggestion().contains("writable"));
    }
}

//! The HTTP collaborator contract.
//!
//! The core never talks to the network directly. Everything goes through a
//! [`Fetch`] implementation: the CLI provides a caching, rate-limited
//! blocking client, tests provide canned responses.

use std::path::Path;

use serde_json::Value;

use crate::error::RequestError;

/// Blocking GET and download-to-file.
pub trait Fetch {
    /// GET `url` and return the response body. Any non-200 response is an
    /// error.
    fn get_text(&self, url: &str) -> Result<String, RequestError>;

    /// Write the body of `url` to `target`, creating parent directories as
    /// needed.
    fn download(&self, url: &str, target: &Path) -> Result<(), RequestError>;

    /// GET `url` and parse the body as JSON.
    fn get_json(&self, url: &str) -> Result<Value, RequestError> {
        let body = self.get_text(url)?;
        serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
    }
}

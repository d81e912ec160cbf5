//! A classified remote server.

use std::cell::OnceCell;

use tracing::debug;

use crate::base_url;
use crate::emoji::Emoji;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::software::{Family, Software, DETECTION_ORDER};

/// One remote server: where it lives and what it runs.
///
/// The emoji listing is fetched lazily on first access and reused afterwards.
#[derive(Debug)]
pub struct Instance {
    base_url: String,
    software: Software,
    emoji: OnceCell<Vec<Emoji>>,
}

impl Instance {
    /// Create an instance for an already normalized base URL.
    pub fn new(base_url: impl Into<String>, software: Software) -> Self {
        Self {
            base_url: base_url.into(),
            software,
            emoji: OnceCell::new(),
        }
    }

    /// Normalize `url` and detect its software using [`DETECTION_ORDER`].
    pub fn classify(url: &str, http: &dyn Fetch) -> Result<Self> {
        Self::classify_with(url, http, &DETECTION_ORDER)
    }

    /// Normalize `url` and walk `families` in order, returning the first
    /// match.
    pub fn classify_with(url: &str, http: &dyn Fetch, families: &[&dyn Family]) -> Result<Self> {
        let base_url = base_url::normalize(url)?;

        for family in families {
            if let Some(software) = family.probe(http, &base_url) {
                debug!("{} identified as {}", base_url, software);
                return Ok(Self::new(base_url, software));
            }
        }

        Err(Error::Classification(base_url))
    }

    /// `scheme://host[:port]`, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn software(&self) -> Software {
        self.software
    }

    /// All custom emoji of this instance, fetched on first call.
    pub fn emoji(&self, http: &dyn Fetch) -> &[Emoji] {
        self.emoji
            .get_or_init(|| self.software.family().fetch_emoji(http, &self.base_url))
    }
}

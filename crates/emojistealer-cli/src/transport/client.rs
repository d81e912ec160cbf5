//! Blocking HTTP client implementing the core [`Fetch`] contract.

use std::cell::RefCell;
use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use emojistealer_core::{Fetch, RequestError};
use reqwest::blocking::{Client, ClientBuilder, Response};
use reqwest::StatusCode;
use tracing::debug;

use super::cache::TtlCache;
use super::rate_limit::TokenBucket;

/// Transport settings. Not user-tunable beyond turning the cache off.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    /// How long metadata responses are reused.
    pub cache_ttl: Duration,
    pub use_cache: bool,
    /// Requests allowed per `rate_window`, shared by GETs and downloads.
    pub max_requests: u32,
    pub rate_window: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!(
                "emojistealer {} (https://github.com/knuxify/emojistealer)",
                env!("CARGO_PKG_VERSION")
            ),
            cache_ttl: Duration::from_secs(180),
            use_cache: true,
            max_requests: 10,
            rate_window: Duration::from_secs(3),
        }
    }
}

pub struct HttpClient {
    client: Client,
    use_cache: bool,
    cache: RefCell<TtlCache<String>>,
    limiter: RefCell<TokenBucket>,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_builder(Client::builder(), config)
    }

    fn with_builder(builder: ClientBuilder, config: ClientConfig) -> Result<Self> {
        let client = builder
            .user_agent(config.user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            use_cache: config.use_cache,
            cache: RefCell::new(TtlCache::new(config.cache_ttl)),
            limiter: RefCell::new(TokenBucket::new(
                config.max_requests,
                config.rate_window,
                Instant::now(),
            )),
        })
    }

    fn send(&self, url: &str) -> Result<Response, RequestError> {
        self.limiter.borrow_mut().acquire();
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .map_err(|e| RequestError::Transport(e.to_string()))
    }
}

impl Fetch for HttpClient {
    fn get_text(&self, url: &str) -> Result<String, RequestError> {
        if self.use_cache {
            if let Some(body) = self.cache.borrow().get(url, Instant::now()) {
                debug!("Cache hit for {}", url);
                return Ok(body.clone());
            }
        }

        let response = self.send(url)?;
        let status = response.status();
        if status != StatusCode::OK {
            debug!("Request error for {}: {}", url, status.as_u16());
            if let Ok(body) = response.text() {
                debug!("Server response:\n{}", body);
            }
            return Err(RequestError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        if self.use_cache {
            let now = Instant::now();
            let mut cache = self.cache.borrow_mut();
            cache.purge(now);
            cache.insert(url, body.clone(), now);
        }
        Ok(body)
    }

    fn download(&self, url: &str, target: &Path) -> Result<(), RequestError> {
        if let Some(parent) = target.parent() {
            if parent.is_file() {
                return Err(RequestError::Transport(format!(
                    "{} already exists and is a file",
                    parent.display()
                )));
            }
            std::fs::create_dir_all(parent)
                .map_err(|e| RequestError::Transport(e.to_string()))?;
        }

        let mut response = self.send(url)?;
        let status = response.status();
        if !status.is_success() {
            debug!("Download of {} failed: {}", url, status.as_u16());
            return Err(RequestError::Status(status.as_u16()));
        }

        let mut file = File::create(target).map_err(|e| RequestError::Transport(e.to_string()))?;
        if let Err(e) = std::io::copy(&mut response, &mut file) {
            drop(file);
            // Leave nothing behind that a re-run would mistake for a
            // finished download.
            let _ = std::fs::remove_file(target);
            return Err(RequestError::Transport(e.to_string()));
        }
        Ok(())
    }
}

//! Misskey: `GET /api/emojis`.

use serde_json::Value;
use tracing::{debug, warn};

use super::{str_field, Family, Software, INSTANCE_ENDPOINT};
use crate::base_url;
use crate::emoji::Emoji;
use crate::error::RequestError;
use crate::fetch::Fetch;

pub const EMOJI_ENDPOINT: &str = "/api/emojis";

#[derive(Debug, Clone, Copy, Default)]
pub struct Misskey;

impl Family for Misskey {
    /// Misskey has no Mastodon-compatible instance endpoint. Any 404 there is
    /// taken as a Misskey server.
    fn probe(&self, http: &dyn Fetch, base_url: &str) -> Option<Software> {
        match http.get_json(&base_url::join(base_url, INSTANCE_ENDPOINT)) {
            Err(RequestError::Status(404)) => Some(Software::Misskey),
            _ => None,
        }
    }

    fn fetch_emoji(&self, http: &dyn Fetch, base_url: &str) -> Vec<Emoji> {
        let url = base_url::join(base_url, EMOJI_ENDPOINT);
        match http.get_json(&url) {
            Ok(listing) => parse(&listing),
            Err(e) => {
                debug!("Emoji listing at {} unavailable: {}", url, e);
                Vec::new()
            }
        }
    }
}

/// Normalize a Misskey `{"emojis": [...]}` listing.
pub fn parse(listing: &Value) -> Vec<Emoji> {
    let Some(entries) = listing.get("emojis").and_then(Value::as_array) else {
        warn!("Unexpected emoji listing format, expected an emojis list");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let name = str_field(entry, "name");
            if name.is_empty() {
                warn!("Missing shortcode for emoji");
                return None;
            }
            let url = str_field(entry, "url");
            let category = entry
                .get("category")
                .and_then(Value::as_str)
                .map(str::to_string);
            let emoji = Emoji::new(name, category, url, url);
            if emoji.is_none() {
                warn!("Missing URL for emoji {}", name);
            }
            emoji
        })
        .collect()
}

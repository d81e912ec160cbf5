//! Mastodon: `GET /api/v1/custom_emojis`.
//!
//! Also the catch-all family: anything that is neither Pleroma nor Misskey is
//! assumed to speak the Mastodon API.

use serde_json::Value;
use tracing::{debug, warn};

use super::{str_field, Family, Software};
use crate::base_url;
use crate::emoji::{strip_pack_prefix, Emoji};
use crate::fetch::Fetch;

pub const EMOJI_ENDPOINT: &str = "/api/v1/custom_emojis";

#[derive(Debug, Clone, Copy, Default)]
pub struct Mastodon;

impl Family for Mastodon {
    fn probe(&self, _http: &dyn Fetch, _base_url: &str) -> Option<Software> {
        Some(Software::Mastodon)
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

/// Normalize a Mastodon `custom_emojis` array.
///
/// Categories lose any `pack:` prefix, which shows up when Pleroma serves
/// this endpoint.
pub fn parse(listing: &Value) -> Vec<Emoji> {
    let Some(entries) = listing.as_array() else {
        warn!("Unexpected emoji listing format, expected a list");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let shortcode = str_field(entry, "shortcode");
            if shortcode.is_empty() {
                warn!("Missing shortcode for emoji");
                return None;
            }
            let emoji = Emoji::new(
                shortcode,
                strip_pack_prefix(entry.get("category").and_then(Value::as_str)),
                str_field(entry, "url"),
                str_field(entry, "static_url"),
            );
            if emoji.is_none() {
                warn!("Missing URL for emoji {}", shortcode);
            }
            emoji
        })
        .collect()
}

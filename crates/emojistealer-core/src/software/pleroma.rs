//! Pleroma and Akkoma: `GET /api/v1/pleroma/emoji`.
//!
//! The listing is a map of shortcode to `{image_url, tags}`. The pack an
//! emoji belongs to is the first `pack:`-prefixed tag. Image URLs are often
//! relative to the instance.

use serde_json::Value;
use tracing::{debug, warn};

use super::{str_field, Family, Mastodon, Software, INSTANCE_ENDPOINT};
use crate::base_url;
use crate::emoji::{Emoji, PACK_PREFIX};
use crate::fetch::Fetch;

pub const EMOJI_ENDPOINT: &str = "/api/v1/pleroma/emoji";

/// Top-level key present in Pleroma-family instance metadata.
pub const MARKER_KEY: &str = "pleroma";

/// Feature flag Akkoma advertises in `pleroma.metadata.features`.
pub const AKKOMA_FEATURE: &str = "akkoma_api";

#[derive(Debug, Clone, Copy, Default)]
pub struct Pleroma;

impl Family for Pleroma {
    fn probe(&self, http: &dyn Fetch, base_url: &str) -> Option<Software> {
        let url = base_url::join(base_url, INSTANCE_ENDPOINT);
        let info = match http.get_json(&url) {
            Ok(info) => info,
            Err(e) => {
                debug!("Pleroma probe failed for {}: {}", base_url, e);
                return None;
            }
        };
        let metadata = info.get(MARKER_KEY)?;
        if has_akkoma_feature(metadata) {
            Some(Software::Akkoma)
        } else {
            Some(Software::Pleroma)
        }
    }

    fn fetch_emoji(&self, http: &dyn Fetch, base_url: &str) -> Vec<Emoji> {
        let url = base_url::join(base_url, EMOJI_ENDPOINT);
        match http.get_json(&url) {
            Ok(listing) => parse(&listing, base_url),
            Err(e) => {
                // Pleroma also serves the Mastodon endpoint; its categories
                // carry the pack: prefix, which the Mastodon parser strips.
                debug!(
                    "Pleroma emoji API unavailable ({}), falling back to Mastodon API",
                    e
                );
                Mastodon.fetch_emoji(http, base_url)
            }
        }
    }
}

fn has_akkoma_feature(metadata: &Value) -> bool {
    metadata
        .pointer("/metadata/features")
        .and_then(Value::as_array)
        .is_some_and(|features| {
            features
                .iter()
                .any(|f| f.as_str() == Some(AKKOMA_FEATURE))
        })
}

/// Normalize a Pleroma emoji map.
pub fn parse(listing: &Value, base_url: &str) -> Vec<Emoji> {
    let Some(entries) = listing.as_object() else {
        warn!("Unexpected emoji listing format, expected an object");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|(shortcode, entry)| {
            if shortcode.is_empty() {
                warn!("Missing shortcode for emoji");
                return None;
            }
            let image_url = str_field(entry, "image_url");
            if image_url.is_empty() {
                warn!("Missing URL for emoji {}", shortcode);
                return None;
            }
            let url = base_url::resolve(base_url, image_url);
            Emoji::new(shortcode.as_str(), pack_from_tags(entry), url.clone(), url)
        })
        .collect()
}

fn pack_from_tags(entry: &Value) -> Option<String> {
    entry
        .get("tags")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(Value::as_str)
        .find_map(|tag| tag.strip_prefix(PACK_PREFIX))
        .filter(|pack| !pack.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fetch::mock::MockFetch;

    const BASE: &str = "https://pl.example";

    #[test]
    fn test_parse_category_from_pack_tag() {
        let emoji = parse(
            &json!({"foo": {"image_url": "/emoji/stickers/foo.png", "tags": ["foo", "pack:stickers"]}}),
            BASE,
        );
        assert_eq!(emoji.len(), 1);
        assert_eq!(emoji[0].category.as_deref(), Some("stickers"));
    }

    #[test]
    fn test_parse_first_pack_tag_wins() {
        let emoji = parse(
            &json!({"foo": {"image_url": "/a.png", "tags": ["pack:one", "pack:two"]}}),
            BASE,
        );
        assert_eq!(emoji[0].category.as_deref(), Some("one"));
    }

    #[test]
    fn test_parse_without_pack_tag_leaves_category_unset() {
        let emoji = parse(
            &json!({
                "a": {"image_url": "/a.png", "tags": ["Custom"]},
                "b": {"image_url": "/b.png"}
            }),
            BASE,
        );
        assert_eq!(emoji.len(), 2);
        assert!(emoji.iter().all(|e| e.category.is_none()));
    }

    #[test]
    fn test_parse_resolves_relative_urls() {
        let emoji = parse(
            &json!({"blob": {"image_url": "/emoji/blobs/blob.png", "tags": []}}),
            BASE,
        );
        assert_eq!(emoji[0].original_url, "https://pl.example/emoji/blobs/blob.png");
        assert_eq!(emoji[0].static_url, emoji[0].original_url);
    }

    #[test]
    fn test_parse_keeps_absolute_urls() {
        let emoji = parse(
            &json!({"blob": {"image_url": "https://media.pl.example/blob.png", "tags": []}}),
            BASE,
        );
        assert_eq!(emoji[0].original_url, "https://media.pl.example/blob.png");
    }

    #[test]
    fn test_parse_skips_entries_without_url() {
        let emoji = parse(
            &json!({
                "nourl": {"tags": ["pack:x"]},
                "emptyurl": {"image_url": "", "tags": []},
                "ok": {"image_url": "/ok.png", "tags": []}
            }),
            BASE,
        );
        assert_eq!(emoji.len(), 1);
        assert_eq!(emoji[0].shortcode, "ok");
    }

    #[test]
    fn test_probe_detects_pleroma() {
        let http = MockFetch::new().with_json(
            "https://pl.example/api/v1/instance",
            json!({"uri": "pl.example", "pleroma": {"metadata": {"features": ["chat"]}}}),
        );
        assert_eq!(Pleroma.probe(&http, BASE), Some(Software::Pleroma));
    }

    #[test]
    fn test_probe_detects_akkoma_feature() {
        let http = MockFetch::new().with_json(
            "https://pl.example/api/v1/instance",
            json!({"pleroma": {"metadata": {"features": ["chat", "akkoma_api"]}}}),
        );
        assert_eq!(Pleroma.probe(&http, BASE), Some(Software::Akkoma));
    }

    #[test]
    fn test_probe_ignores_instances_without_marker() {
        let http = MockFetch::new().with_json(
            "https://pl.example/api/v1/instance",
            json!({"uri": "pl.example", "version": "4.2.0"}),
        );
        assert_eq!(Pleroma.probe(&http, BASE), None);
    }

    #[test]
    fn test_probe_swallows_request_errors() {
        let http = MockFetch::new().with_transport_error("https://pl.example/api/v1/instance");
        assert_eq!(Pleroma.probe(&http, BASE), None);
    }

    #[test]
    fn test_fetch_falls_back_to_mastodon_api() {
        let http = MockFetch::new()
            .with_status("https://pl.example/api/v1/pleroma/emoji", 404)
            .with_json(
                "https://pl.example/api/v1/custom_emojis",
                json!([{
                    "shortcode": "blob",
                    "url": "https://pl.example/emoji/blob.png",
                    "static_url": "https://pl.example/emoji/blob.png",
                    "category": "pack:blobs"
                }]),
            );
        let emoji = Pleroma.fetch_emoji(&http, BASE);
        assert_eq!(emoji.len(), 1);
        assert_eq!(emoji[0].category.as_deref(), Some("blobs"));
    }

    #[test]
    fn test_fetch_both_endpoints_unreachable() {
        let http = MockFetch::new();
        assert!(Pleroma.fetch_emoji(&http, BASE).is_empty());
    }
}

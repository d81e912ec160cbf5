//! Server software families and their detection order.
//!
//! No Fediverse server reliably identifies itself, so detection is a list of
//! heuristic probes walked in priority order, most specific first:
//!
//! | Order | Family | Probe | Match |
//! |-------|--------|-------|-------|
//! | 1 | Pleroma | `GET /api/v1/instance` | object has a `pleroma` key (Akkoma if `akkoma_api` is a metadata feature) |
//! | 2 | Misskey | `GET /api/v1/instance` | HTTP 404 |
//! | 3 | Mastodon | none | always |
//!
//! A probe whose request fails for any other reason simply does not match.
//!
//! Each family also knows how to fetch its emoji listing and normalize it
//! into [`Emoji`] records. Malformed entries are skipped with a warning and an
//! unreachable listing yields an empty list, never an error.

pub mod mastodon;
pub mod misskey;
pub mod pleroma;

use std::fmt;

use crate::emoji::Emoji;
use crate::fetch::Fetch;

pub use mastodon::Mastodon;
pub use misskey::Misskey;
pub use pleroma::Pleroma;

/// Endpoint used by the Pleroma and Misskey probes.
pub const INSTANCE_ENDPOINT: &str = "/api/v1/instance";

/// Concrete server software, as detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Software {
    Mastodon,
    Pleroma,
    /// Pleroma fork, detected through its `akkoma_api` feature flag.
    Akkoma,
    Misskey,
}

impl fmt::Display for Software {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Software::Mastodon => write!(f, "Mastodon"),
            Software::Pleroma => write!(f, "Pleroma"),
            Software::Akkoma => write!(f, "Akkoma"),
            Software::Misskey => write!(f, "Misskey"),
        }
    }
}

impl Software {
    /// The family that implements fetching for this software.
    pub fn family(self) -> &'static dyn Family {
        match self {
            Software::Mastodon => &Mastodon,
            Software::Pleroma | Software::Akkoma => &Pleroma,
            Software::Misskey => &Misskey,
        }
    }
}

/// Detection and emoji fetching for one server family.
pub trait Family: Sync {
    /// Check whether `base_url` runs this family.
    ///
    /// Returns the concrete software on a match. Request failures are not
    /// errors here, they just mean "no match".
    fn probe(&self, http: &dyn Fetch, base_url: &str) -> Option<Software>;

    /// Fetch and normalize the custom emoji of `base_url`.
    fn fetch_emoji(&self, http: &dyn Fetch, base_url: &str) -> Vec<Emoji>;
}

/// Families in the order the classifier tries them.
pub static DETECTION_ORDER: [&dyn Family; 3] = [&Pleroma, &Misskey, &Mastodon];

/// Read an optional string field, treating `null` and non-strings as absent.
pub(crate) fn str_field<'a>(value: &'a serde_json::Value, key: &str) -> &'a str {
    value.get(key).and_then(serde_json::Value::as_str).unwrap_or("")
}

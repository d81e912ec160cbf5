//! Core logic for emojistealer.
//!
//! This crate identifies the software a Fediverse server runs, fetches its
//! custom emoji into one uniform shape, tracks an interactive selection over
//! them, and downloads the selection with per-category `pack.json`
//! manifests. All network access goes through the [`fetch::Fetch`] trait.
//!
//! # Modules
//!
//! - [`base_url`]: normalizing user input into `scheme://host`
//! - [`software`]: server families, detection probes and emoji normalizers
//! - [`instance`]: classification and the memoized emoji listing
//! - [`catalog`]: shortcode and category lookups
//! - [`selection`]: the selection command grammar and state
//! - [`download`]: asset download and manifest writing
//! - [`error`]: error types with suggestions
//!
//! # Detection
//!
//! | Order | Software | Signal |
//! |-------|----------|--------|
//! | 1 | Pleroma / Akkoma | `pleroma` key in `/api/v1/instance` |
//! | 2 | Misskey | `/api/v1/instance` answers 404 |
//! | 3 | Mastodon | fallback |

pub mod base_url;
pub mod catalog;
pub mod download;
pub mod emoji;
pub mod error;
pub mod fetch;
pub mod instance;
pub mod selection;
pub mod software;

pub use catalog::Catalog;
pub use emoji::{Emoji, UrlPreference};
pub use error::{Error, RequestError, Result};
pub use fetch::Fetch;
pub use instance::Instance;
pub use software::Software;

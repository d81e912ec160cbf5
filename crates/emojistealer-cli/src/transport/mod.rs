//! HTTP transport: a rate-limited blocking client with a short-lived
//! response cache for metadata requests. Downloads are never cached.

pub mod cache;
pub mod client;
pub mod rate_limit;

pub use client::{ClientConfig, HttpClient};

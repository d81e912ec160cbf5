//! In-memory response cache with a fixed time-to-live.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Values keyed by URL, valid for `ttl` after insertion.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: HashMap<String, (Instant, V)>,
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// The cached value for `key`, unless it expired before `now`.
    pub fn get(&self, key: &str, now: Instant) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|(stored_at, _)| now.saturating_duration_since(*stored_at) < self.ttl)
            .map(|(_, value)| value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V, now: Instant) {
        self.entries.insert(key.into(), (now, value));
    }

    /// Drop expired entries.
    pub fn purge(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (stored_at, _)| now.saturating_duration_since(*stored_at) < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_returned() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(180));
        cache.insert("https://a/x", "body".to_string(), start);

        let later = start + Duration::from_secs(179);
        assert_eq!(cache.get("https://a/x", later).map(String::as_str), Some("body"));
    }

    #[test]
    fn test_expired_entry_is_ignored() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(180));
        cache.insert("https://a/x", 1, start);

        assert_eq!(cache.get("https://a/x", start + Duration::from_secs(180)), None);
    }

    #[test]
    fn test_missing_key() {
        let cache: TtlCache<u8> = TtlCache::new(Duration::from_secs(1));
        assert_eq!(cache.get("nope", Instant::now()), None);
    }

    #[test]
    fn test_insert_refreshes_timestamp() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(10));
        cache.insert("k", 1, start);
        cache.insert("k", 2, start + Duration::from_secs(8));

        assert_eq!(cache.get("k", start + Duration::from_secs(15)), Some(&2));
    }

    #[test]
    fn test_purge_drops_expired() {
        let start = Instant::now();
        let mut cache = TtlCache::new(Duration::from_secs(10));
        cache.insert("old", 1, start);
        cache.insert("new", 2, start + Duration::from_secs(9));

        cache.purge(start + Duration::from_secs(12));
        assert_eq!(cache.entries.len(), 1);
        assert!(cache.get("new", start + Duration::from_secs(12)).is_some());
    }
}

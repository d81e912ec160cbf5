//! Request rate limiting.
//!
//! A token bucket shared by every request the client makes. Tokens refill at
//! a steady rate up to the bucket capacity; a request that finds the bucket
//! empty waits instead of failing.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TokenBucket {
    capacity: f64,
    /// May go negative: callers that were told to wait have already spent
    /// their token.
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    /// Allow `requests` requests per `window`, starting with a full bucket.
    pub fn new(requests: u32, window: Duration, now: Instant) -> Self {
        let capacity = f64::from(requests.max(1));
        let window = window.as_secs_f64().max(f64::EPSILON);
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec: capacity / window,
            last_refill: now,
        }
    }

    /// Take a token at `now`. Returns how long to wait before sending.
    pub fn acquire_at(&mut self, now: Instant) -> Duration {
        self.refill(now);

        let wait = if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - self.tokens) / self.refill_per_sec)
        };
        self.tokens -= 1.0;
        wait
    }

    /// Take a token, sleeping until it is available.
    pub fn acquire(&mut self) {
        let wait = self.acquire_at(Instant::now());
        if !wait.is_zero() {
            tracing::debug!("Rate limit reached, waiting {:?}", wait);
            std::thread::sleep(wait);
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * self.refill_per_sec).min(self.capacity);
        if now > self.last_refill {
            self.last_refill = now;
        }
    }
}

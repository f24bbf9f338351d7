//! Sliding-window request limiter keyed by client address.
//!
//! Counting is approximate under concurrent bursts from one client: a check is a single
//! locked prune-and-push, with no reservation across requests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Keys with no hits inside the window are dropped once the map grows past this size.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        RateLimiter {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from `key`; `false` when the key is over its budget.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut hits = self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if hits.len() > SWEEP_THRESHOLD {
            let window = self.window;
            hits.retain(|_, times| times.iter().any(|t| now.duration_since(*t) < window));
        }
        let times = hits.entry(key.to_string()).or_default();
        times.retain(|t| now.duration_since(*t) < self.window);
        if times.len() >= self.max_requests {
            return false;
        }
        times.push(now);
        true
    }
}

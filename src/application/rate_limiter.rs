//! Fixed-interval gate pacing calls to the metric provider.
//!
//! Callers `acquire` a slot before each request. Slots are handed out at most once
//! per `interval` no matter how many tasks share the limiter, so the scan loop can
//! run sequentially or through a worker pool with the same upstream request rate.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

#[derive(Debug)]
pub struct RateLimiter {
    /// Name for logging
    name: String,
    interval: Duration,
    /// Earliest instant the next slot may start
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Wait for the next slot. The first call returns immediately.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }

        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(t) if t > now => t,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };

        if slot > Instant::now() {
            trace!(limiter = %self.name, wait_ms = (slot - Instant::now()).as_millis() as u64, "pacing");
            sleep_until(slot).await;
        }
    }
}

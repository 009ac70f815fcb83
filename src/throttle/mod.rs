//! Request pacing for throttled external services.
//!
//! Every call routed through a [`RateLimiter`] sleeps *before* it runs, for a
//! delay of `base ± jitter` floored at `floor`. There are no token buckets or
//! counters: the external policy is interval based, so the only state is a
//! gate that serializes the pre-call sleeps of concurrent callers sharing one
//! limiter.

pub mod config;

#[cfg(test)]
mod tests;

pub use config::ThrottleConfig;

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;
use tracing::debug;

/// Shared, synchronized limiter for one external service.
///
/// Wrap in an `Arc` and hand clones to every caller of the same endpoint.
#[derive(Debug)]
pub struct RateLimiter {
    config: ThrottleConfig,
    gate: Mutex<()>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}

impl RateLimiter {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            gate: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Draws the next pre-call delay: `base + U(-jitter, +jitter)`, never below `floor`.
    pub fn next_delay(&self) -> Duration {
        let base = self.config.base.as_secs_f64();
        let jitter = self.config.jitter.as_secs_f64();
        let floor = self.config.floor.as_secs_f64();

        let offset = if jitter > 0.0 {
            rand::thread_rng().gen_range(-jitter..=jitter)
        } else {
            0.0
        };

        Duration::from_secs_f64((base + offset).max(floor))
    }

    /// Sleeps for [`next_delay`](Self::next_delay), then runs `operation` and forwards its output.
    ///
    /// The gate is held only for the sleep, so concurrent callers are spaced at
    /// least `floor` apart while the operations themselves may overlap.
    pub async fn throttle<F, Fut, T>(&self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        {
            let _gate = self.gate.lock().await;
            let delay = self.next_delay();
            debug!(delay_ms = delay.as_millis() as u64, "Throttling external call");
            tokio::time::sleep(delay).await;
        }

        operation().await
    }
}

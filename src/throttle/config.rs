use std::time::Duration;

use crate::constants::{
    DEFAULT_THROTTLE_BASE_MS, DEFAULT_THROTTLE_FLOOR_MS, DEFAULT_THROTTLE_JITTER_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Delay parameters for a [`RateLimiter`](super::RateLimiter).
pub struct ThrottleConfig {
    /// Nominal delay before each call.
    pub base: Duration,
    /// Half-width of the uniform jitter around `base`.
    pub jitter: Duration,
    /// Hard minimum delay.
    pub floor: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(DEFAULT_THROTTLE_BASE_MS),
            jitter: Duration::from_millis(DEFAULT_THROTTLE_JITTER_MS),
            floor: Duration::from_millis(DEFAULT_THROTTLE_FLOOR_MS),
        }
    }
}

impl ThrottleConfig {
    pub fn from_millis(base: u64, jitter: u64, floor: u64) -> Self {
        Self {
            base: Duration::from_millis(base),
            jitter: Duration::from_millis(jitter),
            floor: Duration::from_millis(floor),
        }
    }

    /// Checks that pacing is positive and jitter cannot push the delay negative.
    pub fn validate(&self) -> Result<(), String> {
        if self.floor.is_zero() {
            return Err("throttle floor must be greater than zero".to_string());
        }
        if self.jitter > self.base {
            return Err(format!(
                "throttle jitter ({:?}) must not exceed the base delay ({:?})",
                self.jitter, self.base
            ));
        }
        Ok(())
    }

    /// Largest delay [`next_delay`](super::RateLimiter::next_delay) can return.
    pub fn max_delay(&self) -> Duration {
        (self.base + self.jitter).max(self.floor)
    }
}

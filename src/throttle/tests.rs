use super::*;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

#[test]
fn test_default_config_matches_policy() {
    let config = ThrottleConfig::default();
    assert_eq!(config.base, Duration::from_millis(1000));
    assert_eq!(config.jitter, Duration::from_millis(200));
    assert_eq!(config.floor, Duration::from_millis(800));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_floor_and_wide_jitter() {
    assert!(ThrottleConfig::from_millis(1000, 200, 0).validate().is_err());
    assert!(ThrottleConfig::from_millis(100, 200, 50).validate().is_err());
}

#[test]
fn test_next_delay_stays_within_bounds() {
    let limiter = RateLimiter::default();
    for _ in 0..1_000 {
        let delay = limiter.next_delay();
        assert!(delay >= Duration::from_millis(800), "delay {delay:?} below floor");
        assert!(delay <= Duration::from_millis(1200), "delay {delay:?} above base + jitter");
    }
}

#[test]
fn test_floor_dominates_when_base_is_low() {
    let limiter = RateLimiter::new(ThrottleConfig::from_millis(100, 50, 500));
    for _ in 0..100 {
        assert_eq!(limiter.next_delay(), Duration::from_millis(500));
    }
}

#[tokio::test(start_paused = true)]
async fn test_throttle_forwards_operation_output() {
    let limiter = RateLimiter::default();
    let value = limiter.throttle(|| async { 42 }).await;
    assert_eq!(value, 42);
}

#[tokio::test(start_paused = true)]
async fn test_sequential_calls_respect_floor() {
    let limiter = RateLimiter::default();
    let calls = 10u32;

    let start = Instant::now();
    for _ in 0..calls {
        limiter.throttle(|| async {}).await;
    }
    let elapsed = start.elapsed();

    assert!(
        elapsed >= Duration::from_millis(800) * calls,
        "elapsed {elapsed:?} for {calls} calls"
    );
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_share_pacing() {
    let limiter = Arc::new(RateLimiter::default());
    let stamps = Arc::new(tokio::sync::Mutex::new(Vec::new()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let limiter = Arc::clone(&limiter);
        let stamps = Arc::clone(&stamps);
        handles.push(tokio::spawn(async move {
            limiter
                .throttle(|| async {
                    stamps.lock().await.push(Instant::now());
                })
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut stamps = stamps.lock().await.clone();
    stamps.sort();
    assert_eq!(stamps.len(), 4);
    for pair in stamps.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_millis(800));
    }
}

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use super::*;

fn policy(max_attempts: u32, delay_ms: u64) -> RetryPolicy {
    RetryPolicy { max_attempts, delay: Duration::from_millis(delay_ms) }
}

#[tokio::test]
async fn ready_on_first_check() {
    let calls = AtomicU32::new(0);
    let result = policy(10, 0)
        .wait_ready(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<(), String>(())
        })
        .await;
    assert_eq!(result, Readiness::Ready { attempts: 1 });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ready_after_failures() {
    let calls = AtomicU32::new(0);
    let result = policy(10, 0)
        .wait_ready(|| async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 3 { Err("warming up") } else { Ok(()) }
        })
        .await;
    assert_eq!(result, Readiness::Ready { attempts: 4 });
}

#[tokio::test]
async fn exhausted_after_ceiling() {
    let calls = AtomicU32::new(0);
    let result = policy(10, 0)
        .wait_ready(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>("down")
        })
        .await;
    assert_eq!(result, Readiness::Exhausted { attempts: 10 });
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn zero_attempts_still_checks_once() {
    let calls = AtomicU32::new(0);
    let result = policy(0, 0)
        .wait_ready(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>("down")
        })
        .await;
    assert_eq!(result, Readiness::Exhausted { attempts: 1 });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sleeps_between_checks_only() {
    let started = Instant::now();
    let result = policy(3, 20).wait_ready(|| async { Err::<(), _>("down") }).await;
    assert_eq!(result, Readiness::Exhausted { attempts: 3 });
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[test]
fn defaults_match_startup_window() {
    assert_eq!(RetryPolicy::default(), policy(10, 500));
    assert_eq!(RetryPolicy::from(ReadinessConfig { max_attempts: 4, delay_ms: 25 }), policy(4, 25));
}

//! Integration tests for the countdown latch

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::thread;
use std::time::Duration;

use cornerstone_common::sync::{await_latch, CountDownLatch, WaitOutcome};
use tracing_subscriber::EnvFilter;

/// Route the timeout warnings into the captured test output
fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("cornerstone_common=debug"))
            .with_test_writer()
            .try_init();
    });
}

/// Validates a typical worker fan-out where the coordinator waits for
/// every worker to report in.
///
/// # Test Steps
/// 1. Spawn workers that each count the latch down once
/// 2. Wait with a generous timeout and a callback that must not run
/// 3. Verify the latch is open and the callback never fired
#[test]
fn test_workers_release_coordinator() {
    init_tracing();
    let workers = 4;
    let latch = CountDownLatch::new(workers);
    let handles: Vec<_> = (0..workers)
        .map(|i| {
            let latch = latch.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(5 * i as u64));
                latch.count_down();
            })
        })
        .collect();

    let timed_out = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&timed_out);
    let opened = await_latch(
        &latch,
        Duration::from_secs(10),
        Some(move || flag.store(true, Ordering::SeqCst)),
    );

    assert!(opened);
    assert!(latch.is_released());
    assert!(!timed_out.load(Ordering::SeqCst));
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_stalled_worker_triggers_callback() {
    init_tracing();
    let latch = CountDownLatch::new(2);
    latch.count_down();

    let timed_out = AtomicBool::new(false);
    let opened = await_latch(
        &latch,
        Duration::from_millis(20),
        Some(|| timed_out.store(true, Ordering::SeqCst)),
    );

    assert!(!opened);
    assert!(timed_out.load(Ordering::SeqCst));
    assert_eq!(latch.count(), 1);
}

#[test]
fn test_many_waiters_released_together() {
    let latch = CountDownLatch::new(1);
    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let latch = latch.clone();
            thread::spawn(move || latch.wait_outcome(Duration::from_secs(10)))
        })
        .collect();

    thread::sleep(Duration::from_millis(10));
    latch.count_down();
    for waiter in waiters {
        assert_eq!(waiter.join().unwrap(), WaitOutcome::Released);
    }
}

//! Countdown latch and timed wait helper
//!
//! A [`CountDownLatch`] opens once its count reaches zero; waiters block
//! until then. Clones share the same count.
//!
//! ```
//! use std::thread;
//! use std::time::Duration;
//!
//! use cornerstone_common::sync::{await_latch, CountDownLatch};
//!
//! let latch = CountDownLatch::new(2);
//! for _ in 0..2 {
//!     let latch = latch.clone();
//!     thread::spawn(move || latch.count_down());
//! }
//!
//! let opened = await_latch(&latch, Duration::from_secs(5), None::<fn()>);
//! assert!(opened);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{trace, warn};

/// How a bounded wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Released,
    TimedOut,
}

crate::impl_status_conversions!(WaitOutcome {
    Released => "released",
    TimedOut => "timed_out",
});

struct State {
    count: Mutex<usize>,
    released: Condvar,
}

/// Blocks waiters until `count_down` has been called `count` times
#[derive(Clone)]
pub struct CountDownLatch {
    state: Arc<State>,
}

impl std::fmt::Debug for CountDownLatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountDownLatch").field("count", &self.count()).finish()
    }
}

impl CountDownLatch {
    /// A latch that opens after `count` calls to [`count_down`](Self::count_down)
    ///
    /// A zero count is already open.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { state: Arc::new(State { count: Mutex::new(count), released: Condvar::new() }) }
    }

    /// Decrements the count, waking all waiters when it reaches zero
    ///
    /// Extra calls on an open latch do nothing.
    pub fn count_down(&self) {
        let mut count = self.state.count.lock();
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            drop(count);
            trace!("Latch released");
            self.state.released.notify_all();
        }
    }

    /// Remaining count
    #[must_use]
    pub fn count(&self) -> usize {
        *self.state.count.lock()
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.count() == 0
    }

    /// Blocks until the latch opens
    pub fn wait(&self) {
        let mut count = self.state.count.lock();
        while *count > 0 {
            self.state.released.wait(&mut count);
        }
    }

    /// Blocks until the latch opens or `timeout` passes
    pub fn wait_outcome(&self, timeout: Duration) -> WaitOutcome {
        let deadline = Instant::now().checked_add(timeout);
        let mut count = self.state.count.lock();
        while *count > 0 {
            match deadline {
                Some(deadline) => {
                    let timed_out = self.state.released.wait_until(&mut count, deadline).timed_out();
                    if timed_out && *count > 0 {
                        return WaitOutcome::TimedOut;
                    }
                }
                // timeout too large to represent: wait without one
                None => self.state.released.wait(&mut count),
            }
        }
        WaitOutcome::Released
    }

    /// Whether the latch opened within `timeout`
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.wait_outcome(timeout) == WaitOutcome::Released
    }
}

/// Waits up to `timeout` for `latch` to open
///
/// On timeout a warning is logged, `on_timeout` runs once, and `false` is
/// returned.
pub fn await_latch<F>(latch: &CountDownLatch, timeout: Duration, on_timeout: Option<F>) -> bool
where
    F: FnOnce(),
{
    let outcome = latch.wait_outcome(timeout);
    if outcome == WaitOutcome::TimedOut {
        warn!(
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            remaining = latch.count(),
            outcome = %outcome,
            "Timed out waiting for latch"
        );
        if let Some(callback) = on_timeout {
            callback();
        }
        return false;
    }
    true
}

// ============================================================================
// Settlement Latch
// Outstanding-work counter awaited by callers of a book
// ============================================================================

use crate::interfaces::CompletionSignal;
use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Counter of settlements a caller is waiting for.
///
/// The caller `add`s the number of transactions it expects, hands the latch
/// to the book, and `wait`s. Each settlement calls `done` once. One latch
/// per book or per batch; nothing here is global.
#[derive(Debug, Default)]
pub struct SettlementLatch {
    outstanding: Mutex<usize>,
    zero: Condvar,
}

impl SettlementLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `count` more settlements
    pub fn add(&self, count: usize) {
        *self.outstanding.lock() += count;
    }

    pub fn outstanding(&self) -> usize {
        *self.outstanding.lock()
    }

    /// Block until the counter reaches zero
    pub fn wait(&self) {
        let mut outstanding = self.outstanding.lock();
        while *outstanding > 0 {
            self.zero.wait(&mut outstanding);
        }
    }

    /// Block until the counter reaches zero or `timeout` elapses.
    /// Returns true if the counter reached zero.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut outstanding = self.outstanding.lock();
        while *outstanding > 0 {
            if self.zero.wait_until(&mut outstanding, deadline).timed_out() {
                return *outstanding == 0;
            }
        }
        true
    }
}

impl CompletionSignal for SettlementLatch {
    fn done(&self) {
        let mut outstanding = self.outstanding.lock();
        match outstanding.checked_sub(1) {
            Some(remaining) => {
                *outstanding = remaining;
                if remaining == 0 {
                    self.zero.notify_all();
                }
            }
            None => tracing::warn!("settlement signalled with no outstanding work"),
        }
    }
}

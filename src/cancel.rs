//! Cancellation scope, completion tracking, and signal hookup.

use anyhow::{Context, Result};
use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};

/// Process-wide cancellation flag, shared by reference with every
/// in-flight operation. Transitions once, irreversibly, from active to
/// cancelled; holders poll [`is_cancelled`](Self::is_cancelled) and
/// abort outstanding work when it flips.
#[derive(Debug, Default)]
pub struct CancelScope {
    cancelled: AtomicBool,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Returns true only for the call that
    /// performed the transition, so repeated signals act once.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::Relaxed)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Count of enqueued-but-unfinished work items. [`add`](Self::add) on
/// enqueue, [`done`](Self::done) when a worker finishes (success or
/// failure); [`wait_drained`](Self::wait_drained) gates exit on zero.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    outstanding: Mutex<usize>,
    drained: Condvar,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self) {
        *self.outstanding.lock().unwrap() += 1;
    }

    pub fn done(&self) {
        let mut n = self.outstanding.lock().unwrap();
        debug_assert!(*n > 0, "done() without matching add()");
        *n -= 1;
        if *n == 0 {
            self.drained.notify_all();
        }
    }

    /// Block until every added item has been marked done.
    pub fn wait_drained(&self) {
        let mut n = self.outstanding.lock().unwrap();
        while *n > 0 {
            n = self.drained.wait(n).unwrap();
        }
    }

    pub fn outstanding(&self) -> usize {
        *self.outstanding.lock().unwrap()
    }
}

/// Bridge interrupt/termination signals to the scope. Only the first
/// signal acts; the one-way transition makes later deliveries no-ops.
pub fn install_signal_handler(scope: Arc<CancelScope>) -> Result<()> {
    ctrlc::set_handler(move || {
        if scope.cancel() {
            warn!("interrupt received; draining in-flight conversions");
        }
    })
    .context("set signal handler")
}

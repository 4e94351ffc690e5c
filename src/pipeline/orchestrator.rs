//! Run orchestration: wire queue, workers, producer, and drain gate.

use anyhow::Result;
use crossbeam_channel::bounded;
use log::debug;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::cancel::{CancelScope, CompletionTracker};
use crate::types::{Opts, RunSummary, WorkItem};

use super::scheduler::{self, Totals, WORKER_COUNT};
use super::walk::enumerate;

/// Convert everything under `root` per `opts`, observing `scope` for
/// cancellation. Blocks until all accepted work has drained, then
/// returns the summary. An enumeration error cancels the scope (whole
/// run aborts), still drains in-flight work, and is returned as the
/// fatal error; per-item failures are only counted and logged.
pub fn press_dir(root: &Path, opts: &Opts, scope: &Arc<CancelScope>) -> Result<RunSummary> {
    let workers = opts.workers.unwrap_or(WORKER_COUNT);
    let (work_tx, work_rx) = bounded::<WorkItem>(workers);
    let tracker = Arc::new(CompletionTracker::new());
    let totals = Arc::new(Totals::default());

    let handles = scheduler::spawn_workers(
        work_rx,
        Arc::clone(scope),
        Arc::clone(&tracker),
        Arc::clone(&totals),
        opts.toolchain.clone(),
        workers,
    );

    // Producer runs on this thread; bounded sends give backpressure.
    let walked = enumerate(root, opts, &work_tx, &tracker, scope);
    if walked.is_err() {
        // Fatal: stop outstanding external operations, then drain.
        scope.cancel();
    }

    // Closing the queue lets workers exit once it is empty; exit is
    // gated on the tracker so no item is abandoned mid-flight.
    drop(work_tx);
    tracker.wait_drained();
    for handle in handles {
        let _ = handle.join();
    }
    debug!("work queue drained");

    let (accepted, skipped) = walked?;
    let converted = totals.converted.load(Ordering::Relaxed);
    let failed = totals.failed.load(Ordering::Relaxed);
    debug_assert_eq!(accepted, converted + failed);
    Ok(RunSummary {
        converted,
        skipped,
        failed,
        cancelled: scope.is_cancelled(),
    })
}

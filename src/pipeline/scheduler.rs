//! Bounded work queue and the fixed worker pool that drains it.

use crossbeam_channel::Receiver;
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crate::cancel::{CancelScope, CompletionTracker};
use crate::types::{Toolchain, WorkItem};

use super::tags::export_tags;
use super::transcode::transcode;

/// Worker count; the queue capacity always equals it, so at most this
/// many items are queued while that many more are converting. Chosen
/// to match the original tool; conversions are decoder/encoder-bound,
/// so more workers would only oversubscribe the CPU.
pub const WORKER_COUNT: usize = 32;

/// Per-run outcome counters, shared across workers.
#[derive(Debug, Default)]
pub struct Totals {
    pub converted: AtomicUsize,
    pub failed: AtomicUsize,
}

/// Spawn the worker pool. Workers run until the queue is closed and
/// drained; each marks its item done in the tracker whatever the
/// outcome, so the drain gate never hangs or double-counts.
pub fn spawn_workers(
    work_rx: Receiver<WorkItem>,
    scope: Arc<CancelScope>,
    tracker: Arc<CompletionTracker>,
    totals: Arc<Totals>,
    tools: Toolchain,
    count: usize,
) -> Vec<JoinHandle<()>> {
    (0..count)
        .map(|_| {
            let work_rx = work_rx.clone();
            let scope = Arc::clone(&scope);
            let tracker = Arc::clone(&tracker);
            let totals = Arc::clone(&totals);
            let tools = tools.clone();
            thread::spawn(move || worker_loop(work_rx, &scope, &tracker, &totals, &tools))
        })
        .collect()
}

fn worker_loop(
    work_rx: Receiver<WorkItem>,
    scope: &CancelScope,
    tracker: &CompletionTracker,
    totals: &Totals,
    tools: &Toolchain,
) {
    while let Ok(item) = work_rx.recv() {
        match convert_item(&item, scope, tools) {
            Ok(()) => {
                totals.converted.fetch_add(1, Ordering::Relaxed);
                debug!("converted {}", item.path.display());
            }
            Err(e) if e.is_cancelled() => {
                totals.failed.fetch_add(1, Ordering::Relaxed);
                debug!("<{}>: {}", item.path.display(), e);
            }
            Err(e) => {
                totals.failed.fetch_add(1, Ordering::Relaxed);
                error!("<{}>: {}", item.path.display(), e);
            }
        }
        tracker.done();
    }
}

fn convert_item(
    item: &WorkItem,
    scope: &CancelScope,
    tools: &Toolchain,
) -> Result<(), super::error::ConvertError> {
    let tags = export_tags(&item.path, scope, tools)?;
    transcode(item, &tags, scope, tools)
}

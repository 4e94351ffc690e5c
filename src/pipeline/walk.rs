//! Enumeration producer: walk the tree, filter to stale FLAC sources,
//! and feed the bounded work queue.

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

use crate::cancel::{CancelScope, CompletionTracker};
use crate::types::{Opts, WorkItem};

use super::filter::needs_convert;
use super::naming::output_path;

/// Walk `root` and send every FLAC file whose output is missing or
/// stale onto the queue. The send blocks when the queue is full, which
/// is the backpressure that bounds memory and process usage.
///
/// The tracker is bumped before each send and undone if the send fails
/// (channel closed), so every item is counted exactly once. Walk and
/// stat errors are fatal and abort the run. Returns
/// `(accepted, skipped)` counts.
pub fn enumerate(
    root: &Path,
    opts: &Opts,
    work_tx: &Sender<WorkItem>,
    tracker: &CompletionTracker,
    scope: &CancelScope,
) -> Result<(usize, usize)> {
    let mut walker = WalkDir::new(root);
    if !opts.recurse {
        walker = walker.max_depth(1);
    }

    let mut accepted = 0_usize;
    let mut skipped = 0_usize;
    for entry in walker {
        // Stop accepting new items once cancelled; in-flight ones drain.
        if scope.is_cancelled() {
            break;
        }
        let entry = entry.context("walk directory tree")?;
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("flac") {
            continue;
        }
        if !needs_convert(path, &output_path(path))? {
            skipped += 1;
            continue;
        }
        tracker.add();
        if work_tx
            .send(WorkItem {
                path: path.to_path_buf(),
            })
            .is_err()
        {
            tracker.done();
            break;
        }
        accepted += 1;
    }
    debug!("enumeration done: {accepted} accepted, {skipped} up to date");
    Ok((accepted, skipped))
}

//! Flacpress: parallel incremental FLAC→MP3 conversion.
//!
//! Walks a directory tree for FLAC masters, skips files whose MP3
//! output is already up to date, and converts the rest through an
//! external decoder piped straight into an external encoder, carrying
//! the source's embedded tags across. A bounded work queue caps
//! concurrent resource usage; a shared cancellation scope lets Ctrl+C
//! (or a library caller) stop the run with in-flight work drained and
//! no half-written outputs left behind.

pub mod cancel;
pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::path::Path;
use std::sync::Arc;

use cancel::CancelScope;

/// Result alias used by public flacpress API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: convert everything under `root` with `opts`,
/// observing `scope` for cancellation, and return what happened.
///
/// Blocks until all accepted work has drained — also after
/// cancellation, so no external process outlives the call. Per-item
/// failures are logged and counted in the summary; the returned error
/// is reserved for fatal enumeration failures, which abort the run.
pub fn press_dir(root: &Path, opts: &Opts, scope: &Arc<CancelScope>) -> Result<RunSummary> {
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    pipeline::orchestrator::press_dir(root, opts, scope)
}

//! Public types for the flacpress API and pipeline.

use std::collections::HashMap;
use std::path::PathBuf;

/// One unit of conversion work: a single source file. Created by the
/// enumeration stage, consumed exactly once by exactly one worker.
#[derive(Clone, Debug)]
pub struct WorkItem {
    pub path: PathBuf,
}

/// Tag name → tag value, as exported from the source file's embedded
/// metadata. Built fresh per conversion and owned by one worker.
pub type TagMap = HashMap<String, String>;

/// External programs the pipeline shells out to. Defaults are the
/// standard FLAC/LAME toolchain; tests point these at stubs.
#[derive(Clone, Debug)]
pub struct Toolchain {
    /// Tag exporter, invoked as `<tag_export> --export-tags-to=- <src>`.
    pub tag_export: String,
    /// Decoder, invoked as `<decoder> -c -d <src>` with stdout piped.
    pub decoder: String,
    /// Encoder, reads raw audio on stdin and writes the output file.
    pub encoder: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            tag_export: "metaflac".to_string(),
            decoder: "flac".to_string(),
            encoder: "lame".to_string(),
        }
    }
}

/// Options for [`press_dir`](crate::press_dir).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Walk into child directories. Default: true.
    pub recurse: bool,
    /// Override worker count (queue capacity always equals it).
    /// When None, uses [`WORKER_COUNT`](crate::pipeline::WORKER_COUNT).
    pub workers: Option<usize>,
    /// External programs to invoke.
    pub toolchain: Toolchain,
}

impl Default for Opts {
    fn default() -> Self {
        Opts {
            recurse: true,
            workers: None,
            toolchain: Toolchain::default(),
        }
    }
}

/// What a run did: per-item outcomes plus whether it was interrupted.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunSummary {
    /// Items converted successfully.
    pub converted: usize,
    /// Items skipped as up to date.
    pub skipped: usize,
    /// Items that failed (logged, non-fatal).
    pub failed: usize,
    /// True when the run was cancelled by a signal (or programmatically)
    /// and drained early.
    pub cancelled: bool,
}

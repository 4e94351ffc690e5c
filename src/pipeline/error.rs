//! Per-item error taxonomy. Every variant is caught at the worker
//! boundary, logged tagged with the item's path, and never affects
//! sibling items. Fatal (whole-run) errors are plain `anyhow` and only
//! come out of the enumeration stage.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// A tag-export line that does not split into NAME=VALUE.
    #[error("invalid tag line {0:?}")]
    TagParse(String),

    /// An external program could not be started.
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// An external program exited with a non-zero status (or was killed).
    #[error("{tool} exited with {status}")]
    Exited { tool: String, status: ExitStatus },

    /// Waiting on an external program failed.
    #[error("failed to wait on {tool}: {source}")]
    Wait {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The decoder's stdout handle was not available for wiring into
    /// the encoder.
    #[error("decoder stdout was not captured")]
    PipeSetup,

    /// Reading the tag exporter's captured output failed.
    #[error("failed to read tag output: {0}")]
    TagRead(io::Error),

    /// The shared scope was cancelled before or during this item.
    #[error("cancelled")]
    Cancelled,
}

impl ConvertError {
    /// Cancelled items are shutdown noise, not conversion failures;
    /// workers log them at debug instead of error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConvertError::Cancelled)
    }
}

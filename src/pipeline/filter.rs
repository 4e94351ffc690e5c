//! Incremental skip decision: compare source and output mtimes.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Returns true when `src` still needs converting: the output is
/// missing, or the source is strictly newer than it. An existing output
/// whose mtime is not earlier than the source's means up to date.
///
/// Errors here are enumeration errors and abort the whole run: any
/// stat failure on the output other than NotFound, and any stat
/// failure on the source once the output exists. Per-item leniency
/// deliberately does not apply at this stage.
pub fn needs_convert(src: &Path, dest: &Path) -> Result<bool> {
    let dest_meta = match fs::metadata(dest) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(true),
        Err(e) => {
            return Err(e).with_context(|| format!("stat output {}", dest.display()));
        }
    };
    let src_meta =
        fs::metadata(src).with_context(|| format!("stat source {}", src.display()))?;
    let src_mtime = src_meta
        .modified()
        .with_context(|| format!("mtime of {}", src.display()))?;
    let dest_mtime = dest_meta
        .modified()
        .with_context(|| format!("mtime of {}", dest.display()))?;
    Ok(src_mtime > dest_mtime)
}

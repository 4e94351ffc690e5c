//! Source path → output path mapping. Pure, no I/O.

use std::path::{Path, PathBuf};

/// Derive the output path for a source file: directory unchanged, leaf
/// gets `:` replaced with `-` (unsafe on some filesystems), a leading
/// dot (derived/in-progress artifact, not a user file), and the `.mp3`
/// suffix. `D/track:01.flac` → `D/.track-01.flac.mp3`.
pub fn output_path(src: &Path) -> PathBuf {
    let leaf = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    src.with_file_name(format!(".{}.mp3", leaf.replace(':', "-")))
}

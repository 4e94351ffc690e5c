//! Two-stage external transcode: decoder piped straight into encoder,
//! joined with cancel-on-first-failure and destination cleanup.

use std::fs;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;

use crate::cancel::CancelScope;
use crate::types::{TagMap, Toolchain, WorkItem};

use super::POLL_INTERVAL;
use super::error::ConvertError;
use super::naming::output_path;

/// Encoder bitrate, matching the original toolchain invocation.
const ENCODE_BITRATE: &str = "192";

/// Convert one item: decode `item.path` to a raw stream, encode that
/// stream into the derived output path with the item's tags. On any
/// failure of the pair the destination is removed best-effort before
/// the error is returned, so a re-run will pick the item up again.
pub fn transcode(
    item: &WorkItem,
    tags: &TagMap,
    scope: &CancelScope,
    tools: &Toolchain,
) -> Result<(), ConvertError> {
    let dest = output_path(&item.path);
    let result = run_pair(&item.path, &dest, tags, scope, tools);
    if result.is_err() {
        // Never leave a half-written output behind. Removal errors are
        // swallowed so they cannot mask the conversion error.
        let _ = fs::remove_file(&dest);
    }
    result
}

fn tag<'a>(tags: &'a TagMap, name: &str) -> &'a str {
    tags.get(name).map(String::as_str).unwrap_or_default()
}

fn run_pair(
    src: &Path,
    dest: &Path,
    tags: &TagMap,
    scope: &CancelScope,
    tools: &Toolchain,
) -> Result<(), ConvertError> {
    if scope.is_cancelled() {
        return Err(ConvertError::Cancelled);
    }

    let mut decoder = Command::new(&tools.decoder)
        .args(["-c", "-d"])
        .arg(src)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ConvertError::Spawn {
            tool: tools.decoder.clone(),
            source,
        })?;

    // Wire the decoder's stdout directly into the encoder's stdin; the
    // OS pipe is the only buffering between the two.
    let Some(decoded) = decoder.stdout.take() else {
        let _ = decoder.kill();
        let _ = decoder.wait();
        return Err(ConvertError::PipeSetup);
    };

    let encoder = Command::new(&tools.encoder)
        .args(["-b", ENCODE_BITRATE, "-h"])
        .args(["--tt", tag(tags, "TITLE")])
        .args(["--tn", tag(tags, "TRACKNUMBER")])
        .args(["--tg", tag(tags, "GENRE")])
        .args(["--ta", tag(tags, "ARTIST")])
        .args(["--tl", tag(tags, "ALBUM")])
        .args(["--ty", tag(tags, "DATE")])
        .arg("--add-id3v2")
        .arg("-")
        .arg(dest)
        .stdin(Stdio::from(decoded))
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn();
    let encoder = match encoder {
        Ok(child) => child,
        Err(source) => {
            let _ = decoder.kill();
            let _ = decoder.wait();
            return Err(ConvertError::Spawn {
                tool: tools.encoder.clone(),
                source,
            });
        }
    };

    join_pair(
        (decoder, &tools.decoder),
        (encoder, &tools.encoder),
        scope,
    )
}

/// Await both children of a pipeline pair. The first failure observed
/// (non-zero exit, wait error, or scope cancellation) tears the sibling
/// down and becomes the pair's outcome; success means both exited zero.
fn join_pair(
    decoder: (Child, &str),
    encoder: (Child, &str),
    scope: &CancelScope,
) -> Result<(), ConvertError> {
    let mut children = [decoder, encoder];
    let mut done = [false, false];
    let mut first_failure: Option<ConvertError> = None;

    loop {
        if first_failure.is_none() && scope.is_cancelled() {
            first_failure = Some(ConvertError::Cancelled);
        }

        for i in 0..children.len() {
            if done[i] {
                continue;
            }
            let (child, tool) = &mut children[i];
            match child.try_wait() {
                Ok(Some(status)) => {
                    done[i] = true;
                    if !status.success() && first_failure.is_none() {
                        first_failure = Some(ConvertError::Exited {
                            tool: tool.to_string(),
                            status,
                        });
                    }
                }
                Ok(None) => {}
                Err(source) => {
                    done[i] = true;
                    if first_failure.is_none() {
                        first_failure = Some(ConvertError::Wait {
                            tool: tool.to_string(),
                            source,
                        });
                    }
                }
            }
        }

        if first_failure.is_some() {
            for (i, (child, _)) in children.iter_mut().enumerate() {
                if !done[i] {
                    let _ = child.kill();
                }
            }
        }

        if done.iter().all(|&d| d) {
            break;
        }
        thread::sleep(POLL_INTERVAL);
    }

    match first_failure {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

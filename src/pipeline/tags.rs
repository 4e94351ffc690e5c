//! Metadata extraction: run the tag exporter and parse its NAME=VALUE
//! output into a [`TagMap`].

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use crate::cancel::CancelScope;
use crate::types::{TagMap, Toolchain};

use super::POLL_INTERVAL;
use super::error::ConvertError;

/// Run `<tag_export> --export-tags-to=- <src>`, capture stdout, and
/// parse it. The exporter's stderr goes to our own stderr. The child
/// is awaited with the same poll-and-kill loop as the transcode pair,
/// so a cancelled scope terminates a running exporter instead of
/// waiting it out.
pub fn export_tags(
    src: &Path,
    scope: &CancelScope,
    tools: &Toolchain,
) -> Result<TagMap, ConvertError> {
    if scope.is_cancelled() {
        return Err(ConvertError::Cancelled);
    }

    let mut child = Command::new(&tools.tag_export)
        .arg("--export-tags-to=-")
        .arg(src)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ConvertError::Spawn {
            tool: tools.tag_export.clone(),
            source,
        })?;

    let Some(mut stdout) = child.stdout.take() else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(ConvertError::PipeSetup);
    };

    // Drain stdout on a side thread; an oversized tag block must not
    // fill the pipe and wedge the child. The reader sees EOF when the
    // child exits or is killed, so the join below never hangs.
    let reader = thread::spawn(move || {
        let mut raw = String::new();
        stdout.read_to_string(&mut raw).map(|_| raw)
    });

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                let _ = reader.join();
                return Err(ConvertError::Wait {
                    tool: tools.tag_export.clone(),
                    source,
                });
            }
        }
        if scope.is_cancelled() {
            let _ = child.kill();
            let _ = child.wait();
            let _ = reader.join();
            return Err(ConvertError::Cancelled);
        }
        thread::sleep(POLL_INTERVAL);
    };

    let raw = match reader.join() {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => return Err(ConvertError::TagRead(e)),
        Err(_) => {
            return Err(ConvertError::TagRead(io::Error::other(
                "tag reader thread panicked",
            )));
        }
    };

    if !status.success() {
        return Err(ConvertError::Exited {
            tool: tools.tag_export.clone(),
            status,
        });
    }

    parse_tags(&raw)
}

/// Parse tag-export output: one `NAME=VALUE` per line, split on the
/// first `=` (values may contain `=`). A non-empty line with no `=` is
/// fatal for the item; empty lines are skipped.
pub fn parse_tags(raw: &str) -> Result<TagMap, ConvertError> {
    let mut tags = TagMap::new();
    for line in raw.lines() {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once('=')
            .ok_or_else(|| ConvertError::TagParse(line.to_string()))?;
        tags.insert(name.to_string(), value.to_string());
    }
    Ok(tags)
}

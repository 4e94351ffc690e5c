use flacpress::WorkItem;
use flacpress::cancel::CompletionTracker;
use flacpress::pipeline::{ConvertError, needs_convert, output_path, parse_tags};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flacpress-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

// --- output_path ---

#[test]
fn test_output_path_plain() {
    assert_eq!(
        output_path(Path::new("album/song.flac")),
        PathBuf::from("album/.song.flac.mp3")
    );
}

#[test]
fn test_output_path_colon_replaced() {
    assert_eq!(
        output_path(Path::new("album/track:01.flac")),
        PathBuf::from("album/.track-01.flac.mp3")
    );
}

#[test]
fn test_output_path_multiple_colons() {
    assert_eq!(
        output_path(Path::new("a:b:c.flac")),
        PathBuf::from(".a-b-c.flac.mp3")
    );
}

#[test]
fn test_output_path_no_directory() {
    assert_eq!(output_path(Path::new("x.flac")), PathBuf::from(".x.flac.mp3"));
}

#[test]
fn test_output_path_directory_preserved() {
    assert_eq!(
        output_path(Path::new("/music/ab:cd/e:f.flac")),
        PathBuf::from("/music/ab:cd/.e-f.flac.mp3")
    );
}

// --- parse_tags ---

#[test]
fn test_parse_tags_well_formed() {
    let tags = parse_tags("TITLE=Song\nARTIST=Band\n").unwrap();
    assert_eq!(tags.get("TITLE").unwrap(), "Song");
    assert_eq!(tags.get("ARTIST").unwrap(), "Band");
    assert_eq!(tags.len(), 2);
}

#[test]
fn test_parse_tags_value_may_contain_equals() {
    let tags = parse_tags("COMMENT=a=b=c\n").unwrap();
    assert_eq!(tags.get("COMMENT").unwrap(), "a=b=c");
}

#[test]
fn test_parse_tags_empty_input() {
    assert!(parse_tags("").unwrap().is_empty());
}

#[test]
fn test_parse_tags_empty_lines_skipped() {
    let tags = parse_tags("TITLE=x\n\nALBUM=y\n").unwrap();
    assert_eq!(tags.len(), 2);
}

#[test]
fn test_parse_tags_missing_equals_is_fatal() {
    let err = parse_tags("TITLE=x\nNOEQUALS\n").unwrap_err();
    assert!(matches!(err, ConvertError::TagParse(line) if line == "NOEQUALS"));
}

#[test]
fn test_parse_tags_empty_name_allowed() {
    let tags = parse_tags("=orphan\n").unwrap();
    assert_eq!(tags.get("").unwrap(), "orphan");
}

#[test]
fn test_parse_tags_duplicate_key_last_wins() {
    let tags = parse_tags("TITLE=a\nTITLE=b\n").unwrap();
    assert_eq!(tags.get("TITLE").unwrap(), "b");
}

// --- needs_convert ---

#[test]
fn test_needs_convert_missing_output() {
    let dir = test_dir("filter-missing");
    let src = dir.join("a.flac");
    fs::write(&src, b"data").unwrap();
    assert!(needs_convert(&src, &dir.join(".a.flac.mp3")).unwrap());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_needs_convert_output_newer_skips() {
    let dir = test_dir("filter-newer");
    let src = dir.join("a.flac");
    let dest = dir.join(".a.flac.mp3");
    fs::write(&src, b"data").unwrap();
    thread::sleep(Duration::from_millis(1100));
    fs::write(&dest, b"mp3").unwrap();
    assert!(!needs_convert(&src, &dest).unwrap());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_needs_convert_source_newer_reconverts() {
    let dir = test_dir("filter-stale");
    let src = dir.join("a.flac");
    let dest = dir.join(".a.flac.mp3");
    fs::write(&dest, b"mp3").unwrap();
    thread::sleep(Duration::from_millis(1100));
    fs::write(&src, b"data").unwrap();
    assert!(needs_convert(&src, &dest).unwrap());
    let _ = fs::remove_dir_all(&dir);
}

// --- backpressure ---

#[test]
fn test_bounded_queue_blocks_producer_at_capacity() {
    // Same construction press_dir uses: queue capacity equals the
    // worker count.
    let workers = 4;
    let (tx, rx) = crossbeam_channel::bounded::<WorkItem>(workers);
    for i in 0..workers {
        tx.try_send(WorkItem {
            path: PathBuf::from(format!("{i}.flac")),
        })
        .unwrap();
    }
    assert!(tx.is_full());

    // At capacity the producer blocks instead of queueing more.
    let overflow = WorkItem {
        path: PathBuf::from("overflow.flac"),
    };
    let err = tx
        .send_timeout(overflow, Duration::from_millis(50))
        .unwrap_err();
    assert!(err.is_timeout());

    // A worker taking an item frees exactly one slot.
    rx.recv().unwrap();
    tx.try_send(WorkItem {
        path: PathBuf::from("overflow.flac"),
    })
    .unwrap();
    assert!(tx.is_full());
}

// --- CompletionTracker ---

#[test]
fn test_tracker_starts_drained() {
    let tracker = CompletionTracker::new();
    assert_eq!(tracker.outstanding(), 0);
    tracker.wait_drained(); // must not block
}

#[test]
fn test_tracker_add_done() {
    let tracker = CompletionTracker::new();
    tracker.add();
    tracker.add();
    assert_eq!(tracker.outstanding(), 2);
    tracker.done();
    tracker.done();
    assert_eq!(tracker.outstanding(), 0);
}

#[test]
fn test_tracker_wait_drained_across_threads() {
    let tracker = Arc::new(CompletionTracker::new());
    for _ in 0..3 {
        tracker.add();
    }
    let mut handles = Vec::new();
    for i in 0..3_u64 {
        let tracker = Arc::clone(&tracker);
        handles.push(thread::spawn(move || {
            thread::sleep(Duration::from_millis(20 * (i + 1)));
            tracker.done();
        }));
    }
    tracker.wait_drained();
    assert_eq!(tracker.outstanding(), 0);
    for h in handles {
        h.join().unwrap();
    }
}

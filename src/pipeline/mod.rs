//! Pipeline components: naming, skip decision, tag export, the
//! two-stage transcode pair, and the bounded scheduler around them.

pub mod error;
pub mod filter;
pub mod naming;
pub mod orchestrator;
pub mod scheduler;
pub mod tags;
pub mod transcode;
pub mod walk;

use std::time::Duration;

pub use error::ConvertError;
pub use filter::needs_convert;
pub use naming::output_path;
pub use orchestrator::press_dir;
pub use scheduler::{Totals, WORKER_COUNT, spawn_workers};
pub use tags::{export_tags, parse_tags};
pub use transcode::transcode;
pub use walk::enumerate;

/// How often external-process await loops poll child status and the
/// cancellation scope. Short enough that cancellation and sibling
/// teardown feel immediate next to multi-second conversions.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

//! CLI command handler: set up logging and cancellation, run the press.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::cancel::{CancelScope, install_signal_handler};
use crate::engine::arg_parser::Cli;
use crate::types::Opts;
use crate::utils::setup_logging;

fn setup_opts(cli: &Cli) -> Opts {
    setup_logging(cli.verbose);
    Opts {
        recurse: cli.recurse,
        ..Opts::default()
    }
}

/// Run a conversion pass over `cli.dir`. Per-item failures are logged
/// and non-fatal; only enumeration errors propagate out.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli);
    let scope = Arc::new(CancelScope::new());
    install_signal_handler(Arc::clone(&scope))?;

    let summary = crate::press_dir(&cli.dir, &opts, &scope)?;
    info!(
        "converted {}, skipped {} up to date, {} failed",
        summary.converted, summary.skipped, summary.failed
    );
    if summary.cancelled {
        warn!("run was interrupted; in-flight work drained cleanly");
    }
    Ok(())
}

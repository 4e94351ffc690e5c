//! Flacpress CLI: convert FLAC files under a directory to MP3.

use anyhow::Result;
use clap::Parser;
use flacpress::engine::arg_parser::Cli;
use flacpress::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}

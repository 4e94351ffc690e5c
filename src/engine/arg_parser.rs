use clap::Parser;
use std::path::PathBuf;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Parallel incremental FLAC to MP3 converter.
#[derive(Clone, Parser)]
#[command(name = "flacpress")]
#[command(about = "Convert FLAC files under DIR to hidden MP3s, skipping up-to-date outputs.")]
pub struct Cli {
    /// Directory to scan. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Whether to walk into child directories.
    #[arg(long, num_args = 0..=1, default_value_t = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub recurse: bool,

    /// Verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

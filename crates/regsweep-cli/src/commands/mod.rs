//! CLI argument parsing.

pub mod cleanup;

use clap::Parser;

/// Regsweep - keep the newest N tags of every repository in a Docker registry
#[derive(Parser)]
#[command(name = "regsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub cleanup: cleanup::CleanupArgs,

    /// Log progress at info level
    #[arg(short, long)]
    pub verbose: bool,
}

//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the argument structure of the `logmerge`
//! binary.

use std::path::PathBuf;

use clap::Parser;

/// Merge multi-line logs from many hosts into one chronological file.
#[derive(Parser, Debug, Clone)]
#[command(name = "logmerge")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    logmerge api
    logmerge api -c /etc/logmerge/config.json -o merged.log
    logmerge worker -i 1-worker.log -i 2-worker.log.gz
    logmerge --list-modes")]
pub struct Args {
    /// Mode to run, as named in the configuration file
    #[arg(required_unless_present = "list_modes")]
    pub mode: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Merge these files instead of discovering inputs in the export path
    #[arg(short, long = "input", value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Path to output file (default: the mode's export path and filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List available modes and exit
    #[arg(long)]
    pub list_modes: bool,

    /// Delete input files after the merged output is written
    #[arg(long)]
    pub remove_inputs: bool,

    /// Extract timestamps on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Returns the merge configuration selected by the flags.
    pub fn merge_config(&self) -> crate::config::MergeConfig {
        crate::config::MergeConfig::new().with_parallel(!self.sequential)
    }
}

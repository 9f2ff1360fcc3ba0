//! # logmerge
//!
//! A Rust library for merging multi-line log files collected from many hosts
//! into a single, chronologically ordered log.
//!
//! ## Overview
//!
//! Log entries often span several lines: a timestamped header followed by a
//! stack trace or a wrapped payload. logmerge keeps those entries intact while
//! interleaving them by time:
//!
//! 1. **Chunking** - a flat line stream is split into [`Record`]s. A line that
//!    starts with a timestamp opens a new record; every other line continues
//!    the current one.
//! 2. **Extraction** - each record's first line yields a [`TimestampKey`]
//!    through a mode's `date_regex` and `date_format`.
//! 3. **Merging** - records are stably sorted by key and flattened back to
//!    lines. Records with equal timestamps keep their input order.
//!
//! Any record whose timestamp cannot be derived aborts the whole merge. No
//! partial output is ever produced.
//!
//! ## Quick Start
//!
//! ```rust
//! use logmerge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let pattern = TimestampPattern::new(
//!         r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2})",
//!         "%Y-%m-%d %H:%M",
//!     )?;
//!
//!     let file1 = ["2024-01-02 10:00 hello"];
//!     let file2 = ["2024-01-01 09:00 world", "  detail line"];
//!
//!     let (merged, stats) = merge_lines(
//!         file1.iter().chain(file2.iter()).copied(),
//!         &pattern,
//!         &MergeConfig::new(),
//!     )?;
//!
//!     assert_eq!(
//!         merged,
//!         ["2024-01-01 09:00 world", "  detail line", "2024-01-02 10:00 hello"]
//!     );
//!     assert_eq!(stats.records, 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Working with Files
//!
//! ```rust,no_run
//! use logmerge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = Config::load("config.json")?;
//!     let mode = config.mode("api")?;
//!
//!     let files = discover_inputs(&mode.export_path, &mode.file_pattern)?;
//!     let source = LineSource::from_files(&files)?;
//!
//!     let (_, output) = process_and_write(
//!         source.lines(),
//!         &mode.timestamp_pattern()?,
//!         &MergeConfig::new(),
//!         mode.export_file(),
//!     )?;
//!     println!("{} lines saved", output.lines);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] - The merge engine
//!   - [`core::chunker`] - [`chunk`](core::chunk), [`Chunker`](core::Chunker)
//!   - [`core::timestamp`] - [`TimestampPattern`](core::TimestampPattern), [`parse_timestamp`](core::parse_timestamp)
//!   - [`core::merger`] - [`merge`](core::merge), [`merge_by`](core::merge_by), [`flatten`](core::flatten)
//!   - [`core::processor`] - [`merge_lines`](core::merge_lines), [`ProcessingStats`](core::ProcessingStats)
//!   - [`core::output`] - [`write_lines`](core::write_lines), [`OutputStats`](core::OutputStats)
//! - [`input`] - Input discovery, gzip decompression, line-origin lookup
//! - [`config`] - Mode configuration ([`Config`](config::Config), [`Mode`](config::Mode), [`MergeConfig`](config::MergeConfig))
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - Unified error types ([`LogMergeError`], [`Result`])
//! - [`prelude`] - Convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `full` | Everything below except `gen-logs` (default) | - |
//! | `cli` | The `logmerge` binary | `clap`, `tracing-subscriber` |
//! | `parallel` | Multi-threaded timestamp extraction | `rayon` |
//! | `gzip` | Transparent `.gz` input decompression | `flate2` |
//! | `gen-logs` | The `gen_logs` test data generator | `rand` |

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod input;

// Re-export the main types at the crate root for convenience
pub use crate::core::models::{Record, TimestampKey};
pub use error::{LogMergeError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use logmerge::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::core::models::{Record, TimestampKey};

    // Error types
    pub use crate::error::{LogMergeError, Result};

    // Configuration
    pub use crate::config::{Config, MergeConfig, Mode};

    // Engine
    pub use crate::core::chunker::chunk;
    pub use crate::core::merger::{flatten, merge, merge_by};
    pub use crate::core::timestamp::TimestampPattern;

    // Pipeline and output
    pub use crate::core::output::{OutputStats, write_lines};
    pub use crate::core::processor::{ProcessingStats, merge_lines, process_and_write};

    // Input
    pub use crate::input::{LineSource, discover_inputs};
}

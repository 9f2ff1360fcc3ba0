//! Core merge engine for logmerge.
//!
//! This module contains:
//! - [`models`] - [`Record`] and [`TimestampKey`]
//! - [`chunker`] - Line stream to record segmentation
//! - [`timestamp`] - Timestamp pattern matching and parsing
//! - [`merger`] - Stable chronological sort of records
//! - [`processor`] - The full pipeline and its statistics
//! - [`output`] - Merged output writer
//!
//! # Quick Start
//!
//! ```rust
//! use logmerge::core::{
//!     Record, TimestampKey, TimestampPattern,
//!     chunk, merge, flatten, merge_lines, write_lines,
//! };
//! ```

pub mod chunker;
pub mod merger;
pub mod models;
pub mod output;
pub mod processor;
pub mod timestamp;

// Re-export main types for convenience
pub use chunker::{Chunker, chunk};
pub use merger::{flatten, merge, merge_by};
pub use models::{Record, TimestampKey};
pub use output::{OutputStats, write_lines};
pub use processor::{ProcessingStats, merge_lines, process_and_write};
pub use timestamp::{TimestampPattern, parse_timestamp};

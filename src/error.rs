//! Unified error types for logmerge.
//!
//! This module provides a single [`LogMergeError`] enum that covers all error
//! cases in the library. Every failure of the merge engine is terminal: the
//! engine performs no retries and never emits partial output.
//!
//! # Taxonomy
//!
//! - [`Configuration`](LogMergeError::Configuration) - the timestamp regex is
//!   structurally unusable (does not compile, wrong number of capture groups)
//! - [`MalformedRecord`](LogMergeError::MalformedRecord) - a record's leading
//!   line does not match the regex, or the captured text does not parse
//! - [`EmptyInput`](LogMergeError::EmptyInput) - nothing was found to merge
//!
//! The remaining variants belong to the collaborators around the engine
//! (file reading, configuration loading).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for logmerge operations.
///
/// # Example
///
/// ```rust
/// use logmerge::error::Result;
/// use logmerge::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, LogMergeError>;

/// The error type for all logmerge operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogMergeError {
    /// An I/O error occurred.
    ///
    /// This typically happens when writing the merged output fails.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An input file could not be read.
    ///
    /// Invalid UTF-8 and corrupt gzip streams also land here.
    #[error("Failed to read input file {}: {source}", path.display())]
    Read {
        /// The file being read
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },

    /// The timestamp regex has an invalid structure.
    ///
    /// Raised when the regex does not compile, or on the first extraction
    /// attempt when it does not have exactly one capturing group.
    #[error("Invalid timestamp pattern '{pattern}': {reason}")]
    Configuration {
        /// The offending `date_regex`
        pattern: String,
        /// What is wrong with it
        reason: String,
    },

    /// A record's first line did not yield a timestamp.
    ///
    /// Carries the line's position in the concatenated input stream so the
    /// caller can resolve it to a file and line number.
    #[error(
        "Malformed record at input line {}: {reason} (regex '{pattern}', format '{format}'): {line:?}",
        line_index + 1
    )]
    MalformedRecord {
        /// 0-based index of the line in the concatenated input stream
        line_index: usize,
        /// The offending line
        line: String,
        /// The `date_regex` that was applied
        pattern: String,
        /// The `date_format` that was applied
        format: String,
        /// Why no timestamp could be derived
        #[source]
        reason: MalformedReason,
    },

    /// No input lines or records are available to merge.
    ///
    /// Indicates an upstream problem (nothing downloaded, empty files)
    /// rather than a data-quality problem.
    #[error("No input to merge: {context}")]
    EmptyInput {
        /// Where the engine looked
        context: String,
    },

    /// The configuration file is not valid JSON or misses required fields.
    #[error("Failed to parse configuration{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    ConfigFile {
        /// The configuration file, if read from disk
        path: Option<PathBuf>,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The requested mode is not defined in the configuration.
    #[error("Mode '{name}' does not exist. Available modes: {}", available.join(", "))]
    UnknownMode {
        /// The requested mode name
        name: String,
        /// Names of all configured modes
        available: Vec<String>,
    },
}

/// Reasons a record's leading line fails timestamp extraction.
#[derive(Debug, Error)]
pub enum MalformedReason {
    /// The regex does not match the line anywhere.
    #[error("line does not match the timestamp regex")]
    NoMatch,
    /// The regex matched but its capture group did not participate.
    #[error("timestamp capture group is empty")]
    MissingCapture,
    /// The captured text does not parse under the configured format.
    #[error("captured text '{raw}' does not parse: {source}")]
    Unparseable {
        /// The captured date substring
        raw: String,
        /// The chrono parse error
        #[source]
        source: chrono::ParseError,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl LogMergeError {
    /// Creates a configuration error for a timestamp regex.
    pub fn configuration(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        LogMergeError::Configuration {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Creates an empty input error.
    pub fn empty_input(context: impl Into<String>) -> Self {
        LogMergeError::EmptyInput {
            context: context.into(),
        }
    }

    /// Creates a read error for an input file.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LogMergeError::Read {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an I/O or input read error.
    pub fn is_io(&self) -> bool {
        matches!(self, LogMergeError::Io(_) | LogMergeError::Read { .. })
    }

    /// Returns `true` if this is a timestamp pattern configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, LogMergeError::Configuration { .. })
    }

    /// Returns `true` if this is a malformed record error.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, LogMergeError::MalformedRecord { .. })
    }

    /// Returns `true` if this is an empty input error.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, LogMergeError::EmptyInput { .. })
    }

    /// Returns the stream index of the offending line, for malformed records.
    pub fn line_index(&self) -> Option<usize> {
        match self {
            LogMergeError::MalformedRecord { line_index, .. } => Some(*line_index),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

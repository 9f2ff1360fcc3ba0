//! Core data models: multi-line log records and their sort keys.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A multi-line log entry.
///
/// A record is a non-empty, contiguous run of input lines. Its first line is
/// the one that carries (or should carry) the timestamp; the remaining lines
/// are continuations such as stack traces or wrapped payloads.
///
/// Records are created by the [chunker](crate::core::chunker) and never
/// mutated afterwards.
///
/// # Example
///
/// ```
/// use logmerge::Record;
///
/// let record = Record::from_lines(0, vec![
///     "2024-01-01 09:00 world".to_string(),
///     "  detail line".to_string(),
/// ]).unwrap();
///
/// assert_eq!(record.first_line(), "2024-01-01 09:00 world");
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    /// 0-based position of the first line in the concatenated input stream.
    start_index: usize,

    /// Line text without terminators. Never empty.
    lines: Vec<String>,
}

/// Unvalidated wire form of [`Record`].
#[derive(Deserialize)]
struct RawRecord {
    start_index: usize,
    lines: Vec<String>,
}

impl TryFrom<RawRecord> for Record {
    type Error = &'static str;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Self::from_lines(raw.start_index, raw.lines).ok_or("record must have at least one line")
    }
}

impl Record {
    /// Creates a record from its lines.
    ///
    /// Returns `None` for an empty vector: an empty record cannot exist.
    pub fn from_lines(start_index: usize, lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        Some(Self { start_index, lines })
    }

    /// Returns the record's first line.
    pub fn first_line(&self) -> &str {
        // `lines` is non-empty by construction
        &self.lines[0]
    }

    /// Returns all lines of the record, in input order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the stream position of the record's first line.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Returns the number of lines in the record (always at least 1).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Consumes the record, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// The UTC instant derived from a record's leading line.
///
/// Keys are totally ordered; two timestamps that denote the same instant
/// compare equal regardless of how they were written.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use logmerge::TimestampKey;
///
/// let key = TimestampKey::from(Utc.with_ymd_and_hms(1970, 1, 1, 0, 1, 0).unwrap());
/// assert_eq!(key.as_epoch_seconds(), 60.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimestampKey(DateTime<Utc>);

impl TimestampKey {
    /// Returns the key as a UTC date-time.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns seconds since the Unix epoch, with sub-second precision.
    pub fn as_epoch_seconds(&self) -> f64 {
        self.0.timestamp() as f64 + f64::from(self.0.timestamp_subsec_nanos()) / 1e9
    }
}

impl From<DateTime<Utc>> for TimestampKey {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

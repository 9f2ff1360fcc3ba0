//! Timestamp extraction.
//!
//! A [`TimestampPattern`] pairs a mode's `date_regex` with its `date_format`.
//! It serves two purposes:
//!
//! - boundary detection for the [chunker](crate::core::chunker): a line starts
//!   a new record when the regex matches at its very beginning;
//! - key extraction for the [merger](crate::core::merger): the first capture
//!   group of the record's first line is parsed into a UTC instant.
//!
//! # Example
//!
//! ```
//! use logmerge::core::timestamp::TimestampPattern;
//! use logmerge::Record;
//!
//! # fn main() -> logmerge::Result<()> {
//! let pattern = TimestampPattern::new(
//!     r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2})",
//!     "%Y-%m-%d %H:%M",
//! )?;
//!
//! assert!(pattern.is_record_start("2024-01-01 09:00 world"));
//! assert!(!pattern.is_record_start("  detail line"));
//!
//! let record = Record::from_lines(0, vec!["2024-01-01 09:00 world".into()]).unwrap();
//! let key = pattern.extract(&record)?;
//! assert_eq!(key.to_string(), "2024-01-01T09:00:00+00:00");
//! # Ok(())
//! # }
//! ```

use chrono::format::ParseErrorKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

use crate::core::models::{Record, TimestampKey};
use crate::error::{LogMergeError, MalformedReason, Result};

/// Compiled timestamp grammar of a mode.
#[derive(Debug, Clone)]
pub struct TimestampPattern {
    regex: Regex,
    format: String,
}

impl TimestampPattern {
    /// Compiles `date_regex` and pairs it with `date_format`.
    ///
    /// # Errors
    ///
    /// Returns [`LogMergeError::Configuration`] if the regex does not compile.
    /// The capture group count is checked later, on extraction.
    pub fn new(date_regex: &str, date_format: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(date_regex)
            .map_err(|e| LogMergeError::configuration(date_regex, e.to_string()))?;
        Ok(Self {
            regex,
            format: date_format.into(),
        })
    }

    /// Returns the source text of the regex.
    pub fn regex(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the date format string.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns `true` if `line` begins a new record.
    ///
    /// The regex must match at position 0; it is not required to cover the
    /// whole line.
    pub fn is_record_start(&self, line: &str) -> bool {
        // leftmost-first: a match at 0 is always the one reported
        self.regex.find(line).is_some_and(|m| m.start() == 0)
    }

    /// Derives the sort key of a record from its first line.
    pub fn extract(&self, record: &Record) -> Result<TimestampKey> {
        self.extract_line(record.first_line(), record.start_index())
    }

    /// Derives a sort key from a single line.
    ///
    /// `line_index` is the line's position in the input stream and is only
    /// used for error reporting.
    ///
    /// # Errors
    ///
    /// - [`LogMergeError::Configuration`] if the regex does not have exactly
    ///   one capturing group
    /// - [`LogMergeError::MalformedRecord`] if the regex does not match the
    ///   line or the captured text does not parse under the format
    pub fn extract_line(&self, line: &str, line_index: usize) -> Result<TimestampKey> {
        let groups = self.regex.captures_len() - 1;
        if groups != 1 {
            return Err(LogMergeError::configuration(
                self.regex.as_str(),
                format!("expected exactly one capturing group, found {groups}"),
            ));
        }

        let malformed = |reason| LogMergeError::MalformedRecord {
            line_index,
            line: line.to_string(),
            pattern: self.regex.as_str().to_string(),
            format: self.format.clone(),
            reason,
        };

        let caps = self
            .regex
            .captures(line)
            .ok_or_else(|| malformed(MalformedReason::NoMatch))?;
        let raw = caps
            .get(1)
            .ok_or_else(|| malformed(MalformedReason::MissingCapture))?
            .as_str();

        parse_timestamp(raw, &self.format)
            .map(TimestampKey::from)
            .map_err(|source| {
                malformed(MalformedReason::Unparseable {
                    raw: raw.to_string(),
                    source,
                })
            })
    }
}

/// Derives the sort key of `record` under `pattern`.
///
/// Free-function form of [`TimestampPattern::extract`], usable as a merge
/// key function.
pub fn extract(record: &Record, pattern: &TimestampPattern) -> Result<TimestampKey> {
    pattern.extract(record)
}

/// Parses `raw` under a strftime-style `format` into a UTC instant.
///
/// - An explicit offset in the format (`%z`, `%:z`) is honoured.
/// - Without one, the civil date-time is interpreted as UTC.
/// - Date-only formats yield midnight.
/// - Time-only formats yield that time on 1900-01-01.
///
/// # Example
///
/// ```
/// use logmerge::core::timestamp::parse_timestamp;
///
/// let a = parse_timestamp("2024-01-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let b = parse_timestamp("2024-01-01T14:00:00+0200", "%Y-%m-%dT%H:%M:%S%z").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_timestamp(raw: &str, format: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_str(raw, format) {
        return Ok(dt.with_timezone(&Utc));
    }

    match NaiveDateTime::parse_from_str(raw, format) {
        Ok(naive) => Ok(naive.and_utc()),
        Err(err) if err.kind() == ParseErrorKind::NotEnough => {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Ok(date.and_time(NaiveTime::MIN).and_utc());
            }
            if let Ok(time) = NaiveTime::parse_from_str(raw, format) {
                if let Some(date) = NaiveDate::from_ymd_opt(1900, 1, 1) {
                    return Ok(date.and_time(time).and_utc());
                }
            }
            Err(err)
        }
        Err(err) => Err(err),
    }
}

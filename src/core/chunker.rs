//! Reassembles a flat line stream into multi-line records.
//!
//! A line that matches the timestamp pattern at its start opens a new record;
//! every other line continues the current one. Lines before the first
//! timestamped line are absorbed into the first record rather than dropped.
//!
//! # Example
//!
//! ```
//! use logmerge::core::chunker::chunk;
//! use logmerge::core::timestamp::TimestampPattern;
//!
//! # fn main() -> logmerge::Result<()> {
//! let pattern = TimestampPattern::new(r"^(\d{4}-\d{2}-\d{2})", "%Y-%m-%d")?;
//! let lines = ["2024-01-01 A", "cont1", "2024-01-02 B"];
//!
//! let records: Vec<_> = chunk(lines, &pattern).collect();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].lines(), ["2024-01-01 A", "cont1"]);
//! assert_eq!(records[1].lines(), ["2024-01-02 B"]);
//! # Ok(())
//! # }
//! ```

use std::mem;

use crate::core::models::Record;
use crate::core::timestamp::TimestampPattern;

/// Splits `lines` into records using `pattern` for boundary detection.
///
/// The returned iterator is lazy and single-pass. It never yields an empty
/// record; an empty input yields nothing.
pub fn chunk<I>(lines: I, pattern: &TimestampPattern) -> Chunker<'_, I::IntoIter>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Chunker::new(lines.into_iter(), pattern)
}

/// Iterator over the records of a line stream.
///
/// Created by [`chunk`].
#[derive(Debug)]
pub struct Chunker<'p, I> {
    lines: I,
    pattern: &'p TimestampPattern,
    batch: Vec<String>,
    batch_start: usize,
    next_index: usize,
}

impl<'p, I> Chunker<'p, I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    fn new(lines: I, pattern: &'p TimestampPattern) -> Self {
        Self {
            lines,
            pattern,
            batch: Vec::new(),
            batch_start: 0,
            next_index: 0,
        }
    }

    /// Number of input lines consumed so far.
    pub fn lines_consumed(&self) -> usize {
        self.next_index
    }

    fn take_batch(&mut self) -> Option<Record> {
        let lines = mem::take(&mut self.batch);
        Record::from_lines(self.batch_start, lines)
    }
}

impl<I> Iterator for Chunker<'_, I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(line) = self.lines.next() {
            let line: String = line.into();
            let index = self.next_index;
            self.next_index += 1;

            if !self.batch.is_empty() && self.pattern.is_record_start(&line) {
                let completed = self.take_batch();
                self.batch_start = index;
                self.batch.push(line);
                return completed;
            }

            if self.batch.is_empty() {
                self.batch_start = index;
                if index == 0 && !self.pattern.is_record_start(&line) {
                    tracing::warn!(
                        line = %line,
                        "input does not start with a timestamp; leading lines join the first record"
                    );
                }
            }
            self.batch.push(line);
        }

        // Input exhausted: flush whatever is pending (nothing for empty input).
        self.take_batch()
    }
}

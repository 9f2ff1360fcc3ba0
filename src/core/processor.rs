//! Full merge pipeline: chunk, buffer, extract, sort, flatten.

use std::path::Path;

use super::chunker::chunk;
use super::merger::{flatten, merge};
use super::output::{OutputStats, write_lines};
use super::timestamp::TimestampPattern;
use crate::config::MergeConfig;
use crate::error::{LogMergeError, Result};

/// Statistics about the processing result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Number of records merged.
    pub records: usize,
    /// Number of lines in the merged output.
    pub lines: usize,
}

impl ProcessingStats {
    /// Average number of lines per record.
    pub fn lines_per_record(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        self.lines as f64 / self.records as f64
    }
}

/// Merges a line stream into chronological record order.
///
/// # Example
///
/// ```
/// use logmerge::config::MergeConfig;
/// use logmerge::core::processor::merge_lines;
/// use logmerge::core::timestamp::TimestampPattern;
///
/// # fn main() -> logmerge::Result<()> {
/// let pattern = TimestampPattern::new(r"^(\d{4}-\d{2}-\d{2})", "%Y-%m-%d")?;
/// let (lines, stats) = merge_lines(
///     ["2024-01-02 B", "2024-01-01 A", "  more A"],
///     &pattern,
///     &MergeConfig::new(),
/// )?;
///
/// assert_eq!(lines, ["2024-01-01 A", "  more A", "2024-01-02 B"]);
/// assert_eq!(stats.records, 2);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// [`LogMergeError::EmptyInput`] for an empty stream, otherwise any error of
/// [`merge`](super::merger::merge).
pub fn merge_lines<I>(
    lines: I,
    pattern: &TimestampPattern,
    config: &MergeConfig,
) -> Result<(Vec<String>, ProcessingStats)>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let records: Vec<_> = chunk(lines, pattern).collect();
    if records.is_empty() {
        return Err(LogMergeError::empty_input("no input lines"));
    }
    tracing::debug!(records = records.len(), "chunked input");

    let record_count = records.len();
    let merged = flatten(merge(records, pattern, config)?);

    let stats = ProcessingStats {
        records: record_count,
        lines: merged.len(),
    };
    Ok((merged, stats))
}

/// Full processing pipeline: merge + write the result to `output_path`.
///
/// Nothing is written if merging fails.
pub fn process_and_write<I>(
    lines: I,
    pattern: &TimestampPattern,
    config: &MergeConfig,
    output_path: impl AsRef<Path>,
) -> Result<(ProcessingStats, OutputStats)>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let (merged, stats) = merge_lines(lines, pattern, config)?;
    let output = write_lines(output_path, &merged)?;
    Ok((stats, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn pattern() -> TimestampPattern {
        TimestampPattern::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2})", "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_merge_lines_stats() {
        let input = [
            "2024-01-02 10:00 hello",
            "2024-01-01 09:00 world",
            "  detail line",
        ];
        let (lines, stats) = merge_lines(input, &pattern(), &MergeConfig::new()).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            stats,
            ProcessingStats {
                records: 2,
                lines: 3
            }
        );
        assert!((stats.lines_per_record() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_merge_lines_empty() {
        let err = merge_lines(Vec::<String>::new(), &pattern(), &MergeConfig::new()).unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_lines_per_record_zero() {
        assert_eq!(ProcessingStats::default().lines_per_record(), 0.0);
    }

    #[test]
    fn test_process_and_write() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("merged.log");
        let input = ["2024-01-02 10:00 b", "2024-01-01 09:00 a"];

        let (stats, output) =
            process_and_write(input, &pattern(), &MergeConfig::new(), &out).unwrap();

        assert_eq!(stats.records, 2);
        assert_eq!(output.lines, 2);
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "2024-01-01 09:00 a\n2024-01-02 10:00 b\n"
        );
    }

    #[test]
    fn test_failed_merge_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("merged.log");
        let input = ["2024-01-02 10:00 b", "2024-99-01 09:00 bad month"];

        let err = process_and_write(input, &pattern(), &MergeConfig::new(), &out).unwrap_err();
        assert!(err.is_malformed_record());
        assert!(!out.exists());
    }
}

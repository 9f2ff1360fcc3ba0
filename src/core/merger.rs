//! Chronological merge of buffered records.
//!
//! Merging is a two-phase operation: every record is keyed first, then the
//! whole buffer is sorted. The sort is stable, so records with equal keys keep
//! their relative input order.
//!
//! # Example
//!
//! ```
//! use logmerge::config::MergeConfig;
//! use logmerge::core::chunker::chunk;
//! use logmerge::core::merger::{flatten, merge};
//! use logmerge::core::timestamp::TimestampPattern;
//!
//! # fn main() -> logmerge::Result<()> {
//! let pattern = TimestampPattern::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2})", "%Y-%m-%d %H:%M")?;
//! let lines = [
//!     "2024-01-02 10:00 hello",
//!     "2024-01-01 09:00 world",
//!     "  detail line",
//! ];
//!
//! let records = chunk(lines, &pattern).collect();
//! let merged = merge(records, &pattern, &MergeConfig::new())?;
//!
//! assert_eq!(
//!     flatten(merged),
//!     ["2024-01-01 09:00 world", "  detail line", "2024-01-02 10:00 hello"]
//! );
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::MergeConfig;
use crate::core::models::{Record, TimestampKey};
use crate::core::timestamp::TimestampPattern;
use crate::error::{LogMergeError, Result};

/// Sorts `records` by the key `key_fn` derives from each of them.
///
/// # Errors
///
/// - [`LogMergeError::EmptyInput`] if `records` is empty
/// - the error of the first record (in input order) for which `key_fn` fails;
///   no partial result is returned
pub fn merge_by<F>(records: Vec<Record>, key_fn: F, config: &MergeConfig) -> Result<Vec<Record>>
where
    F: Fn(&Record) -> Result<TimestampKey> + Sync,
{
    if records.is_empty() {
        return Err(LogMergeError::empty_input("no records to merge"));
    }

    let keys = compute_keys(&records, &key_fn, config)?;

    let mut keyed: Vec<(TimestampKey, Record)> = keys.into_iter().zip(records).collect();
    keyed.sort_by_key(|(key, _)| *key);

    tracing::debug!(records = keyed.len(), "merged records");
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

/// Sorts `records` by the timestamp of their first line under `pattern`.
pub fn merge(
    records: Vec<Record>,
    pattern: &TimestampPattern,
    config: &MergeConfig,
) -> Result<Vec<Record>> {
    merge_by(records, |record| pattern.extract(record), config)
}

/// Concatenates the lines of `records`, in order.
pub fn flatten(records: Vec<Record>) -> Vec<String> {
    records.into_iter().flat_map(Record::into_lines).collect()
}

fn compute_keys<F>(records: &[Record], key_fn: &F, config: &MergeConfig) -> Result<Vec<TimestampKey>>
where
    F: Fn(&Record) -> Result<TimestampKey> + Sync,
{
    #[cfg(feature = "parallel")]
    if config.parallel {
        tracing::debug!(records = records.len(), "extracting timestamps in parallel");
        // Results keep input order, so collecting into Result reports the
        // earliest failing record no matter which thread failed first.
        let keys: Vec<Result<TimestampKey>> = records.par_iter().map(key_fn).collect();
        return keys.into_iter().collect();
    }

    #[cfg(not(feature = "parallel"))]
    let _ = config;

    tracing::debug!(records = records.len(), "extracting timestamps");
    records.iter().map(key_fn).collect()
}

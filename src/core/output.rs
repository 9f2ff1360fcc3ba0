//! Merged output writer.
//!
//! Each line is written followed by `\n`. Byte and line counts are reported
//! back for the operator summary.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// What [`write_lines`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputStats {
    /// Number of lines written.
    pub lines: usize,
    /// Size of the written file in bytes.
    pub bytes: u64,
}

impl OutputStats {
    /// File size in mebibytes (2^20 bytes).
    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / 1_048_576.0
    }
}

/// Writes `lines` to `path`, one per line, replacing any existing file.
///
/// Missing parent directories are created.
pub fn write_lines<I, S>(path: impl AsRef<Path>, lines: I) -> Result<OutputStats>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut stats = OutputStats::default();

    for line in lines {
        let line = line.as_ref();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        stats.lines += 1;
        stats.bytes += line.len() as u64 + 1;
    }

    writer.flush()?;
    tracing::debug!(path = %path.display(), lines = stats.lines, bytes = stats.bytes, "wrote output");
    Ok(stats)
}

//! Input discovery and reading.
//!
//! Collected log files live in a mode's export directory and are named
//! `<number>-<file>`, where `<number>` identifies the host they came from.
//! [`discover_inputs`] finds them, [`LineSource`] concatenates their lines
//! into the single stream the merge engine consumes.
//!
//! # Example
//!
//! ```rust,no_run
//! use logmerge::input::{LineSource, discover_inputs};
//!
//! # fn main() -> logmerge::Result<()> {
//! let files = discover_inputs("./logs", "app.log*")?;
//! let source = LineSource::from_files(&files)?;
//! println!("{} lines from {} files", source.lines().len(), source.files().len());
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::core::chunker::{Chunker, chunk};
use crate::core::timestamp::TimestampPattern;
use crate::error::{LogMergeError, Result};

/// Lists the collected input files for `file_pattern` in `dir`.
///
/// A file matches when its name is `<digits>-<file_pattern>`, optionally
/// followed by `.gz`. `file_pattern` is a shell-style glob (`*`, `?`,
/// `[abc]`, `[!abc]`); `^` inside brackets is a literal.
///
/// Files are ordered by numeric prefix, then by name.
///
/// # Errors
///
/// - [`LogMergeError::Read`] if `dir` cannot be listed
/// - [`LogMergeError::Configuration`] if the glob is malformed
/// - [`LogMergeError::EmptyInput`] if no file matches
pub fn discover_inputs(dir: impl AsRef<Path>, file_pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let pattern = Pattern::new(file_pattern)
        .map_err(|e| LogMergeError::configuration(file_pattern, e.to_string()))?;

    let mut found: Vec<(u64, String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| LogMergeError::read(dir, e))? {
        let entry = entry.map_err(|e| LogMergeError::read(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(host) = match_input_name(&pattern, name) {
            found.push((host, name.to_string(), path));
        }
    }

    if found.is_empty() {
        return Err(LogMergeError::empty_input(format!(
            "no files matching '<n>-{file_pattern}' in {}",
            dir.display()
        )));
    }

    found.sort();
    tracing::debug!(dir = %dir.display(), files = found.len(), "discovered inputs");
    Ok(found.into_iter().map(|(_, _, path)| path).collect())
}

/// Returns the host number of `name` if it is `<digits>-<pattern>[.gz]`.
fn match_input_name(pattern: &Pattern, name: &str) -> Option<u64> {
    let (host, rest) = name.split_once('-')?;
    if host.is_empty() || !host.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let matched = pattern.matches(rest)
        || rest
            .strip_suffix(".gz")
            .is_some_and(|plain| pattern.matches(plain));
    matched.then(|| host.parse().unwrap_or(u64::MAX))
}

/// Position of a line in its originating file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The file (or label) the line came from.
    pub path: PathBuf,
    /// 1-based line number within that file.
    pub line: usize,
}

#[derive(Debug, Clone)]
struct Span {
    path: PathBuf,
    start: usize,
    len: usize,
}

/// A concatenated, restartable stream of input lines.
///
/// Lines are stored without terminators. The source remembers which file
/// each range of lines came from so stream indices can be mapped back.
#[derive(Debug, Clone, Default)]
pub struct LineSource {
    lines: Vec<String>,
    spans: Vec<Span>,
}

impl LineSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `paths` in order into a new source.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut source = Self::new();
        for path in paths {
            source.push_file(path)?;
        }
        Ok(source)
    }

    /// Appends the lines of a file.
    ///
    /// Files ending in `.gz` are decompressed when the `gzip` feature is
    /// enabled. Returns the number of lines read.
    ///
    /// # Errors
    ///
    /// [`LogMergeError::Read`] if the file cannot be opened, is not valid
    /// UTF-8, or is a corrupt gzip stream.
    pub fn push_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LogMergeError::read(path, e))?;
        let reader = open_reader(path, file);

        let lines = BufReader::new(reader)
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| LogMergeError::read(path, e))?;

        tracing::debug!(path = %path.display(), lines = lines.len(), "read input");
        Ok(self.push_lines(path, lines))
    }

    /// Appends in-memory lines under `label`. Returns the number of lines.
    pub fn push_lines<I, S>(&mut self, label: impl Into<PathBuf>, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = self.lines.len();
        self.lines.extend(lines.into_iter().map(Into::into));
        let len = self.lines.len() - start;
        self.spans.push(Span {
            path: label.into(),
            start,
            len,
        });
        len
    }

    /// Returns all lines, in stream order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the source, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Returns the files (or labels) in the order they were added.
    pub fn files(&self) -> Vec<&Path> {
        self.spans.iter().map(|s| s.path.as_path()).collect()
    }

    /// Returns `true` if no lines have been added.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maps a 0-based stream index to its file and 1-based line number.
    pub fn locate(&self, index: usize) -> Option<Location> {
        self.spans
            .iter()
            .find(|s| index >= s.start && index < s.start + s.len)
            .map(|s| Location {
                path: s.path.clone(),
                line: index - s.start + 1,
            })
    }

    /// Chunks the stream into records.
    ///
    /// Every call starts again from the first line.
    pub fn records<'a>(
        &'a self,
        pattern: &'a TimestampPattern,
    ) -> Chunker<'a, std::slice::Iter<'a, String>> {
        chunk(self.lines.iter(), pattern)
    }
}

#[cfg(feature = "gzip")]
fn open_reader(path: &Path, file: File) -> Box<dyn Read> {
    if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(flate2::read::GzDecoder::new(file))
    } else {
        Box::new(file)
    }
}

#[cfg(not(feature = "gzip"))]
fn open_reader(path: &Path, file: File) -> Box<dyn Read> {
    if path.extension().is_some_and(|ext| ext == "gz") {
        tracing::warn!(path = %path.display(), "gzip support is disabled; reading compressed file as text");
    }
    Box::new(file)
}

/// Deletes consumed input files.
///
/// Stops at the first file that cannot be removed.
pub fn remove_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        fs::remove_file(path)?;
        tracing::debug!(path = %path.display(), "removed input");
    }
    Ok(())
}

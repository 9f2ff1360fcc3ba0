//! Configuration types for modes and merging.
//!
//! A **mode** is a named configuration bundle: the timestamp grammar of a
//! family of log files plus the locations those files are collected from and
//! merged into. Modes are loaded from a JSON file:
//!
//! ```json
//! {
//!   "modes": [
//!     {
//!       "name": "api",
//!       "date_regex": "^(\\d{4}-\\d{2}-\\d{2} \\d{2}:\\d{2}:\\d{2})",
//!       "date_format": "%Y-%m-%d %H:%M:%S",
//!       "remote_path": "/var/log/api/",
//!       "file_pattern": "api.log*",
//!       "export_path": "./logs/",
//!       "export_filename": "api-merged.log",
//!       "ssh_connections": [
//!         { "domain": "api1.example.com", "username": "deploy", "number": "1" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Only `name`, `date_regex` and `date_format` are interpreted by the merge
//! engine. The remote fields are carried for the transfer step and otherwise
//! ignored.
//!
//! # Example
//!
//! ```rust
//! use logmerge::config::Config;
//!
//! # fn main() -> logmerge::Result<()> {
//! let config = Config::from_json_str(r#"{
//!     "modes": [{ "name": "api", "date_regex": "^(\\d{4}-\\d{2}-\\d{2})", "date_format": "%Y-%m-%d" }]
//! }"#)?;
//!
//! let mode = config.mode("api")?;
//! assert_eq!(mode.date_format, "%Y-%m-%d");
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::timestamp::TimestampPattern;
use crate::error::{LogMergeError, Result};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// All configured modes.
    #[serde(default)]
    pub modes: Vec<Mode>,
}

impl Config {
    /// Loads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LogMergeError::Read`] if the file cannot be read and
    /// [`LogMergeError::ConfigFile`] if it is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LogMergeError::read(path, e))?;
        serde_json::from_str(&content).map_err(|source| LogMergeError::ConfigFile {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| LogMergeError::ConfigFile { path: None, source })
    }

    /// Looks up a mode by name.
    ///
    /// # Errors
    ///
    /// Returns [`LogMergeError::UnknownMode`] listing the available names.
    pub fn mode(&self, name: &str) -> Result<&Mode> {
        self.modes
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| LogMergeError::UnknownMode {
                name: name.to_string(),
                available: self.mode_names().into_iter().map(String::from).collect(),
            })
    }

    /// Returns the names of all configured modes, in file order.
    pub fn mode_names(&self) -> Vec<&str> {
        self.modes.iter().map(|m| m.name.as_str()).collect()
    }
}

/// A named configuration bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    /// Unique mode identifier.
    pub name: String,

    /// Regex with exactly one capturing group yielding the date substring.
    pub date_regex: String,

    /// strftime-style format for the captured substring.
    pub date_format: String,

    /// Remote directory the logs are collected from (transfer step only).
    #[serde(default)]
    pub remote_path: String,

    /// Glob for log file names, e.g. `app.log*`.
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// Local directory holding collected inputs and the merged output.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// File name of the merged output inside `export_path`.
    #[serde(default = "default_export_filename")]
    pub export_filename: String,

    /// Hosts the logs are collected from (transfer step only).
    #[serde(default)]
    pub ssh_connections: Vec<SshConnection>,
}

fn default_file_pattern() -> String {
    "*".to_string()
}

fn default_export_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_export_filename() -> String {
    "merged.log".to_string()
}

impl Mode {
    /// Creates a mode with the given timestamp grammar and default locations.
    pub fn new(
        name: impl Into<String>,
        date_regex: impl Into<String>,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date_regex: date_regex.into(),
            date_format: date_format.into(),
            remote_path: String::new(),
            file_pattern: default_file_pattern(),
            export_path: default_export_path(),
            export_filename: default_export_filename(),
            ssh_connections: Vec::new(),
        }
    }

    /// Sets the file name glob.
    #[must_use]
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Sets the local export directory.
    #[must_use]
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }

    /// Sets the merged output file name.
    #[must_use]
    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    /// Returns the full path of the merged output file.
    pub fn export_file(&self) -> PathBuf {
        self.export_path.join(&self.export_filename)
    }

    /// Compiles this mode's timestamp grammar.
    pub fn timestamp_pattern(&self) -> Result<TimestampPattern> {
        TimestampPattern::new(&self.date_regex, self.date_format.clone())
    }
}

/// A host the logs of a mode are collected from.
///
/// `number` prefixes downloaded file names (`<number>-<file>`) so files from
/// different hosts do not collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConnection {
    /// Host name.
    pub domain: String,
    /// Login user.
    pub username: String,
    /// File name prefix for this host.
    pub number: String,
}

/// Configuration for the merge stage.
///
/// # Example
///
/// ```rust
/// use logmerge::config::MergeConfig;
///
/// let config = MergeConfig::new().with_parallel(false);
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Extract timestamps on multiple threads (default: true).
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl MergeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that extracts timestamps on the calling thread.
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    /// Enables or disables parallel timestamp extraction.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}

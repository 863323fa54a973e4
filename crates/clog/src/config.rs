//! Logger configuration

use crate::clock::{Clock, SystemClock};
use crate::{FileLogger, Level, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Rotation threshold of a freshly created logger, in bytes
pub const DEFAULT_ROTATION_THRESHOLD: u64 = 20_000;

/// Threshold substituted when a non-positive value is configured
pub const NORMALIZED_ROTATION_THRESHOLD: u64 = 50_000;

/// Byte accounting used unless configured otherwise
pub const DEFAULT_BYTE_ACCOUNTING: ByteAccounting = ByteAccounting::Exact;

/// Map a requested threshold onto the stored one.
///
/// Zero and negative values do not disable rotation; they select
/// [`NORMALIZED_ROTATION_THRESHOLD`].
#[must_use]
pub fn normalize_rotation_threshold(bytes: i64) -> u64 {
    u64::try_from(bytes)
        .ok()
        .filter(|&bytes| bytes > 0)
        .unwrap_or(NORMALIZED_ROTATION_THRESHOLD)
}

/// How each written message advances the rotation counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteAccounting {
    /// Count the bytes actually written: prefix, message and newline.
    #[default]
    Exact,
    /// Count prefix and message twice and skip the newline. Files rotate
    /// at roughly half the configured size; kept for compatibility with
    /// logs produced by older deployments.
    Doubled,
}

impl ByteAccounting {
    /// Counter increment for one line with the given prefix and message lengths
    #[must_use]
    pub const fn charge(self, prefix_len: usize, message_len: usize) -> u64 {
        let rendered = (prefix_len + message_len) as u64;
        match self {
            Self::Exact => rendered + 1,
            Self::Doubled => rendered * 2,
        }
    }
}

/// Tunables for one logger instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level written
    pub min_level: Level,
    /// Bytes after which the file is rotated; non-positive selects
    /// [`NORMALIZED_ROTATION_THRESHOLD`]
    pub rotation_threshold: i64,
    /// Counter semantics
    pub byte_accounting: ByteAccounting,
}

impl Default for LoggerConfig {
    #[allow(clippy::cast_possible_wrap)]
    fn default() -> Self {
        Self {
            min_level: Level::Debug,
            rotation_threshold: DEFAULT_ROTATION_THRESHOLD as i64,
            byte_accounting: DEFAULT_BYTE_ACCOUNTING,
        }
    }
}

/// Builder for [`FileLogger`]
#[derive(Debug)]
pub struct FileLoggerBuilder {
    base_name: PathBuf,
    config: LoggerConfig,
    clock: Arc<dyn Clock>,
}

impl FileLoggerBuilder {
    pub(crate) fn new(base_name: impl Into<PathBuf>) -> Self {
        Self {
            base_name: base_name.into(),
            config: LoggerConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace every tunable at once
    #[must_use]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the severity floor
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.config.min_level = level;
        self
    }

    /// Set the rotation threshold in bytes
    #[must_use]
    pub const fn rotation_threshold(mut self, bytes: i64) -> Self {
        self.config.rotation_threshold = bytes;
        self
    }

    /// Set the counter semantics
    #[must_use]
    pub const fn byte_accounting(mut self, accounting: ByteAccounting) -> Self {
        self.config.byte_accounting = accounting;
        self
    }

    /// Use a different time source
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create the logger and its first timestamped file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for an empty base name and
    /// [`crate::Error::Io`] if the first file cannot be opened.
    pub fn open(self) -> Result<FileLogger> {
        FileLogger::open_with(self.base_name, &self.config, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_threshold_normalization() {
        assert_eq!(normalize_rotation_threshold(-1), NORMALIZED_ROTATION_THRESHOLD);
        assert_eq!(normalize_rotation_threshold(0), NORMALIZED_ROTATION_THRESHOLD);
        assert_eq!(normalize_rotation_threshold(i64::MIN), NORMALIZED_ROTATION_THRESHOLD);
        assert_eq!(normalize_rotation_threshold(1), 1);
        assert_eq!(normalize_rotation_threshold(300_000_000), 300_000_000);
    }

    #[test]
    fn test_byte_accounting() {
        assert_eq!(ByteAccounting::Exact.charge(30, 10), 41);
        assert_eq!(ByteAccounting::Doubled.charge(30, 10), 80);
        assert_eq!(DEFAULT_BYTE_ACCOUNTING, ByteAccounting::Exact);
    }

    #[test]
    fn test_config_from_toml() {
        let config: LoggerConfig = toml::from_str(
            r#"
            min_level = "WARN"
            rotation_threshold = 4096
            byte_accounting = "doubled"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            LoggerConfig {
                min_level: Level::Warn,
                rotation_threshold: 4096,
                byte_accounting: ByteAccounting::Doubled,
            }
        );
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: LoggerConfig = toml::from_str(r#"min_level = "INFO""#).unwrap();
        assert_eq!(config.rotation_threshold, DEFAULT_ROTATION_THRESHOLD as i64);
        assert_eq!(config.byte_accounting, ByteAccounting::Exact);
    }
}

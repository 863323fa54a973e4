//! Error types for the file logger

use std::io;
use std::path::PathBuf;

/// Result type for file logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by logger construction, configuration and teardown.
///
/// The write path never returns these; see [`crate::FileLogger::emit`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument was missing or empty
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A log file could not be opened
    #[error("failed to open log file {path}: {source}")]
    Io {
        /// The file that failed to open
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Writing or flushing the current log file failed
    #[error("failed to write log file: {0}")]
    Write(#[source] io::Error),

    /// A severity name did not match any level
    #[error("unknown log level: {0}")]
    ParseLevel(String),
}

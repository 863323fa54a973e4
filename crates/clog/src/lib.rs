//! Thread-safe, file-backed logger with size-triggered rotation.
//!
//! Each [`FileLogger`] appends lines of the form
//! `<YYYY-MM-DD HH:MM:SS> <LEVEL> <file>:<line> <message>` to a file named
//! `<base>_<YYYY-MM-DD>_<HH-MM-SS>.log`, flushing every line. Once the
//! bytes written since the last rotation reach the configured threshold
//! the file is closed and a freshly timestamped one is opened.
//!
//! Two process-wide loggers, [`command_logger`] and [`ordinary_logger`],
//! are created on first use. Tests and embedders that need other paths
//! build their own [`LoggerRegistry`].
//!
//! ```no_run
//! use clog::{FileLogger, Level};
//!
//! let logger = FileLogger::create("./log/radar")?;
//! logger.set_level(Level::Warn);
//!
//! clog::debug!(logger, "not written");
//! clog::error!(logger, "sensor {} offline", 3);
//! # Ok::<(), clog::Error>(())
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod clock;
mod config;
mod error;
mod level;
mod logger;
mod macros;
mod record;
mod registry;
mod rotation;

#[cfg(feature = "tracing-compat")]
pub mod compat;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    ByteAccounting, DEFAULT_BYTE_ACCOUNTING, DEFAULT_ROTATION_THRESHOLD, FileLoggerBuilder,
    LoggerConfig, NORMALIZED_ROTATION_THRESHOLD, normalize_rotation_threshold,
};
pub use error::{Error, Result};
pub use level::Level;
pub use logger::{FileLogger, TIMESTAMP_FORMAT, destroy};
pub use record::{Log, Record};
pub use registry::{
    COMMAND_LOG_PATH, LoggerRegistry, NamedLogger, ORDINARY_LOG_PATH, RegistryConfig,
    command_logger, default_registry, ordinary_logger,
};
pub use rotation::{FILE_SUFFIX_FORMAT, rotated_file_name};

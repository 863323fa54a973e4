//! The file logger instance and its write path

use crate::clock::Clock;
use crate::config::{ByteAccounting, FileLoggerBuilder, LoggerConfig, normalize_rotation_threshold};
use crate::rotation::FileState;
use crate::{Error, Level, Log, Record, Result};
use parking_lot::Mutex;
use std::fmt::{self, Write as _};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Timestamp at the start of every line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A thread-safe logger appending to a size-rotated file.
///
/// Every line has the form
/// `<YYYY-MM-DD HH:MM:SS> <LEVEL> <file>:<line> <message>` and is flushed
/// before the call returns. One lock per instance serializes the write,
/// the counter update and any rotation it triggers, so lines from
/// concurrent threads never interleave and never straddle two files.
#[derive(Debug)]
pub struct FileLogger {
    base_name: PathBuf,
    min_level: AtomicU8,
    byte_accounting: ByteAccounting,
    clock: Arc<dyn Clock>,
    state: Mutex<FileState>,
}

impl FileLogger {
    /// Create a logger with default settings: DEBUG floor, 20000 byte
    /// threshold, exact byte accounting.
    ///
    /// The first file, `<path>_<YYYY-MM-DD>_<HH-MM-SS>.log`, is created
    /// immediately. Parent directories must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `path` is empty and
    /// [`Error::Io`] if the first file cannot be opened.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(path).open()
    }

    /// Start configuring a logger for the given base path
    pub fn builder(path: impl Into<PathBuf>) -> FileLoggerBuilder {
        FileLoggerBuilder::new(path)
    }

    pub(crate) fn open_with(
        base_name: PathBuf,
        config: &LoggerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let logger = Self::unopened(base_name, config, clock)?;
        logger.rotate()?;

        tracing::debug!("Created file logger for {}", logger.base_name.display());
        Ok(logger)
    }

    /// Like [`Self::open_with`] but never fails: an unusable path yields a
    /// logger that drops everything until a rotation succeeds.
    pub(crate) fn open_lenient(
        base_name: PathBuf,
        config: &LoggerConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        match Self::unopened(base_name, config, Arc::clone(&clock)) {
            Ok(logger) => {
                if let Err(e) = logger.rotate() {
                    tracing::warn!("Log file unavailable, messages will be dropped: {}", e);
                }
                logger
            }
            Err(e) => {
                tracing::warn!("Logger disabled: {}", e);
                let logger = Self::with_parts(PathBuf::new(), config, clock);
                logger.state.lock().closed = true;
                logger
            }
        }
    }

    fn unopened(base_name: PathBuf, config: &LoggerConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        if base_name.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("log file path is empty"));
        }
        Ok(Self::with_parts(base_name, config, clock))
    }

    fn with_parts(base_name: PathBuf, config: &LoggerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            base_name,
            min_level: AtomicU8::new(config.min_level as u8),
            byte_accounting: config.byte_accounting,
            clock,
            state: Mutex::new(FileState::new(normalize_rotation_threshold(
                config.rotation_threshold,
            ))),
        }
    }

    /// The path stem every file name is derived from
    #[must_use]
    pub fn base_name(&self) -> &Path {
        &self.base_name
    }

    /// The file currently written to, if one is open
    #[must_use]
    pub fn current_path(&self) -> Option<PathBuf> {
        self.state.lock().current_path.clone()
    }

    /// Current severity floor
    #[must_use]
    pub fn level(&self) -> Level {
        Level::ALL
            .get(usize::from(self.min_level.load(Ordering::Relaxed)))
            .copied()
            .unwrap_or(Level::Fatal)
    }

    /// Change the severity floor.
    ///
    /// Threads already past the level check may still write one message
    /// under the old floor.
    pub fn set_level(&self, level: Level) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    /// Current rotation threshold in bytes
    #[must_use]
    pub fn rotation_threshold(&self) -> u64 {
        self.state.lock().rotation_threshold
    }

    /// Change the rotation threshold. Zero and negative values select
    /// [`crate::NORMALIZED_ROTATION_THRESHOLD`] instead of disabling
    /// rotation.
    pub fn set_rotation_threshold(&self, bytes: i64) {
        self.state.lock().rotation_threshold = normalize_rotation_threshold(bytes);
    }

    /// Counter semantics this logger was created with
    #[must_use]
    pub const fn byte_accounting(&self) -> ByteAccounting {
        self.byte_accounting
    }

    /// Bytes accounted since the last rotation
    #[must_use]
    pub fn bytes_since_rotation(&self) -> u64 {
        self.state.lock().bytes_since_rotation
    }

    /// Number of files opened so far, including the first one
    #[must_use]
    pub fn rotations(&self) -> u64 {
        self.state.lock().rotations
    }

    /// Whether [`Self::close`] has been called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Close the current file and open a freshly named one.
    ///
    /// Normally triggered by the write path; exposed for callers that want
    /// to cut a file on their own schedule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the new file cannot be opened. The logger
    /// keeps running without a file until a later rotation succeeds.
    pub fn rotate(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Ok(());
        }
        let path = state.rotate(&self.base_name, self.clock.now())?;
        drop(state);

        self.trace_rotation(&path);
        Ok(())
    }

    fn trace_rotation(&self, path: &Path) {
        tracing::debug!(
            "Rotated log file for {} -> {}",
            self.base_name.display(),
            path.display()
        );
    }

    /// Flush and close the current file. Later messages are dropped.
    ///
    /// Closing an already closed logger is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if buffered data could not be flushed.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;
        state.current_path = None;
        state.close_file().map_err(Error::Write)
    }

    /// Close the logger and release it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if buffered data could not be flushed.
    pub fn destroy(self) -> Result<()> {
        self.close()
    }

    /// Write one message if `level` passes the floor.
    ///
    /// Best-effort: formatting and I/O failures drop the message and are
    /// reported through `tracing`, never to the caller.
    pub fn emit(&self, level: Level, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        let mut buf = String::with_capacity(128);
        if write!(
            buf,
            "{} {} {}:{} ",
            self.clock.now().format(TIMESTAMP_FORMAT),
            level,
            file,
            line
        )
        .is_err()
        {
            return;
        }
        let prefix_len = buf.len();
        if buf.write_fmt(args).is_err() {
            return;
        }
        let message_len = buf.len() - prefix_len;
        buf.push('\n');

        let mut state = self.state.lock();
        if state.closed {
            return;
        }

        let write_result = state.file.as_mut().map(|file| {
            file.write_all(buf.as_bytes())
                .and_then(|()| file.flush())
        });
        state.bytes_since_rotation += self.byte_accounting.charge(prefix_len, message_len);

        let rotate_result = state
            .threshold_reached()
            .then(|| state.rotate(&self.base_name, self.clock.now()));
        drop(state);

        if let Some(Err(e)) = write_result {
            tracing::warn!("Failed to write log line: {}", e);
        }
        match rotate_result {
            Some(Ok(path)) => self.trace_rotation(&path),
            Some(Err(e)) => tracing::warn!("Failed to rotate log file: {}", e),
            None => {}
        }
    }
}

impl Log for FileLogger {
    #[inline]
    fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    fn log(&self, record: &Record<'_>) {
        self.emit(record.level, record.file, record.line, record.args);
    }

    fn flush(&self) {
        let result = self.state.lock().file.as_mut().map(Write::flush);
        if let Some(Err(e)) = result {
            tracing::warn!("Failed to flush log file: {}", e);
        }
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        if let Err(e) = self.state.get_mut().close_file() {
            tracing::warn!("Failed to flush log file on drop: {}", e);
        }
    }
}

/// Tear down a logger that may be absent.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for `None` and [`Error::Write`] if
/// the final flush fails.
pub fn destroy(logger: Option<FileLogger>) -> Result<()> {
    logger
        .ok_or(Error::InvalidArgument("logger is absent"))?
        .destroy()
}

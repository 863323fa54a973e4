//! Log records and the sink trait the level macros target

use crate::Level;
use std::fmt;
use std::sync::Arc;

/// A single message on its way to a sink.
///
/// Borrowed for the duration of one `log` call; the message is rendered
/// by the sink, not here.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Severity of the message
    pub level: Level,
    /// Call-site source file
    pub file: &'a str,
    /// Call-site line number
    pub line: u32,
    /// The caller's format string and arguments
    pub args: fmt::Arguments<'a>,
}

impl<'a> Record<'a> {
    /// Create a record with no call-site information
    #[inline]
    #[must_use]
    pub const fn new(level: Level, args: fmt::Arguments<'a>) -> Self {
        Self {
            level,
            file: "",
            line: 0,
            args,
        }
    }

    /// Builder-style method for setting the call site
    #[inline]
    #[must_use]
    pub const fn with_location(mut self, file: &'a str, line: u32) -> Self {
        self.file = file;
        self.line = line;
        self
    }
}

/// A destination for records.
///
/// Implemented by [`crate::FileLogger`] and forwarded through references,
/// `Arc` and `Option`. An absent (`None`) sink discards everything.
pub trait Log: Send + Sync {
    /// Check if a level would currently be written
    fn enabled(&self, level: Level) -> bool;

    /// Write a record. Never fails from the caller's point of view.
    fn log(&self, record: &Record<'_>);

    /// Flush anything not yet on disk
    fn flush(&self);
}

impl<T: Log + ?Sized> Log for &T {
    #[inline]
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    #[inline]
    fn log(&self, record: &Record<'_>) {
        (**self).log(record);
    }

    fn flush(&self) {
        (**self).flush();
    }
}

impl<T: Log + ?Sized> Log for Arc<T> {
    #[inline]
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    #[inline]
    fn log(&self, record: &Record<'_>) {
        (**self).log(record);
    }

    fn flush(&self) {
        (**self).flush();
    }
}

impl<T: Log> Log for Option<T> {
    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.as_ref().is_some_and(|log| log.enabled(level))
    }

    #[inline]
    fn log(&self, record: &Record<'_>) {
        if let Some(log) = self {
            log.log(record);
        }
    }

    fn flush(&self) {
        if let Some(log) = self {
            log.flush();
        }
    }
}

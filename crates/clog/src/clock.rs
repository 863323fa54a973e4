//! Wall-clock sources for timestamps and rotated file names

use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use std::fmt;
use std::time::Duration;

/// Supplies the local wall time used for line timestamps and file names.
pub trait Clock: Send + Sync + fmt::Debug + 'static {
    /// Current local time
    fn now(&self) -> NaiveDateTime;
}

/// The process's local time zone clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// Useful for tests and for replaying logs with fixed timestamps.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    #[must_use]
    pub const fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock to `now`
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let by = chrono::Duration::from_std(by).unwrap_or(chrono::Duration::MAX);
        let mut now = self.now.lock();
        *now = now.checked_add_signed(by).unwrap_or(NaiveDateTime::MAX);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

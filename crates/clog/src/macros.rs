//! Level macros capturing the call site

/// Log a message at an explicit level.
///
/// The first argument is anything implementing [`crate::Log`]: a
/// `FileLogger`, a reference, an `Arc`, or an `Option` (where `None`
/// discards the message).
///
/// ```no_run
/// # let logger = clog::FileLogger::create("./log/app").unwrap();
/// clog::log!(logger, clog::Level::Warn, "queue depth {}", 17);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        let logger = &$logger;
        if $crate::Log::enabled(logger, level) {
            $crate::Log::log(
                logger,
                &$crate::Record::new(level, ::std::format_args!($($arg)+))
                    .with_location(::std::file!(), ::std::line!()),
            );
        }
    }};
}

/// Log at DEBUG
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log at INFO
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log at WARN
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log at ERROR
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log at FATAL
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}

/// Print `<file>: Line <line>:\t<message>` to stderr.
///
/// Expands to nothing when the `console` feature is disabled.
#[cfg(feature = "console")]
#[macro_export]
macro_rules! slog {
    ($($arg:tt)+) => {
        ::std::eprintln!(
            "{}: Line {}:\t{}",
            ::std::file!(),
            ::std::line!(),
            ::std::format_args!($($arg)+)
        )
    };
}

/// Print `<file>: Line <line>:\t<message>` to stderr.
///
/// Expands to nothing when the `console` feature is disabled.
#[cfg(not(feature = "console"))]
#[macro_export]
macro_rules! slog {
    ($($arg:tt)+) => {
        if false {
            let _ = ::std::format_args!($($arg)+);
        }
    };
}

//! Process-wide named loggers

use crate::clock::{Clock, SystemClock};
use crate::{FileLogger, Level, LoggerConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock, OnceLock};

/// Base path of the default "command" logger
pub const COMMAND_LOG_PATH: &str = "./log/command/command";

/// Base path of the default "ordinary" logger
pub const ORDINARY_LOG_PATH: &str = "./log/ordinary/ordinary";

/// The named loggers every registry provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedLogger {
    /// Commands received and executed
    Command,
    /// Everything else
    Ordinary,
}

impl fmt::Display for NamedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::Ordinary => write!(f, "ordinary"),
        }
    }
}

/// Paths and floor for the named loggers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base path of the command logger
    pub command_path: PathBuf,
    /// Base path of the ordinary logger
    pub ordinary_path: PathBuf,
    /// Floor applied to each logger when it is first created
    pub default_level: Level,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            command_path: PathBuf::from(COMMAND_LOG_PATH),
            ordinary_path: PathBuf::from(ORDINARY_LOG_PATH),
            default_level: Level::Info,
        }
    }
}

/// Lazily created, shared named loggers.
///
/// Each logger is built on first access, exactly once, even when several
/// threads race for it. Construction never fails: a logger whose file
/// cannot be opened drops messages until a later rotation succeeds.
#[derive(Debug)]
pub struct LoggerRegistry {
    config: RegistryConfig,
    clock: Arc<dyn Clock>,
    command: OnceLock<FileLogger>,
    ordinary: OnceLock<FileLogger>,
}

impl LoggerRegistry {
    /// Create a registry; no files are touched until first access
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a registry whose loggers use `clock`
    #[must_use]
    pub fn with_clock(config: RegistryConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            command: OnceLock::new(),
            ordinary: OnceLock::new(),
        }
    }

    /// Registry configuration
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get a named logger, creating it on first call
    pub fn get(&self, name: NamedLogger) -> &FileLogger {
        self.slot(name).get_or_init(|| self.build(name))
    }

    /// The command logger
    pub fn command(&self) -> &FileLogger {
        self.get(NamedLogger::Command)
    }

    /// The ordinary logger
    pub fn ordinary(&self) -> &FileLogger {
        self.get(NamedLogger::Ordinary)
    }

    /// Whether a named logger has been created yet
    #[must_use]
    pub fn is_initialized(&self, name: NamedLogger) -> bool {
        self.slot(name).get().is_some()
    }

    const fn slot(&self, name: NamedLogger) -> &OnceLock<FileLogger> {
        match name {
            NamedLogger::Command => &self.command,
            NamedLogger::Ordinary => &self.ordinary,
        }
    }

    fn build(&self, name: NamedLogger) -> FileLogger {
        let path = match name {
            NamedLogger::Command => self.config.command_path.clone(),
            NamedLogger::Ordinary => self.config.ordinary_path.clone(),
        };
        tracing::debug!("Initializing {} logger at {}", name, path.display());

        let config = LoggerConfig {
            min_level: self.config.default_level,
            ..LoggerConfig::default()
        };
        FileLogger::open_lenient(path, &config, Arc::clone(&self.clock))
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

static DEFAULT_REGISTRY: LazyLock<LoggerRegistry> = LazyLock::new(LoggerRegistry::default);

/// The process-wide registry backing [`command_logger`] and [`ordinary_logger`]
pub fn default_registry() -> &'static LoggerRegistry {
    &DEFAULT_REGISTRY
}

/// The process-wide command logger, writing under [`COMMAND_LOG_PATH`]
pub fn command_logger() -> &'static FileLogger {
    DEFAULT_REGISTRY.command()
}

/// The process-wide ordinary logger, writing under [`ORDINARY_LOG_PATH`]
pub fn ordinary_logger() -> &'static FileLogger {
    DEFAULT_REGISTRY.ordinary()
}

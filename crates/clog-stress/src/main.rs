//! Load generator for clog file loggers.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clog::{FileLogger, Level};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base path of the log files; a timestamp and `.log` are appended
    #[arg(long, default_value = "./log/stress/stress", env = "CLOG_STRESS_PATH")]
    path: PathBuf,

    /// Bytes written before the file is rotated
    #[arg(long, default_value_t = 20_000, env = "CLOG_STRESS_THRESHOLD")]
    threshold: i64,

    /// Minimum level written (DEBUG, INFO, WARN, ERROR, FATAL)
    #[arg(long, default_value_t = Level::Debug, env = "CLOG_STRESS_LEVEL")]
    level: Level,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Clone, Debug, Subcommand)]
enum Mode {
    /// Emit one message per level, repeatedly, from a single thread
    Single {
        /// Number of rounds
        #[arg(long, default_value_t = 100_000)]
        iterations: usize,
    },
    /// Run one thread per level, each emitting at its own level
    Threads {
        /// Messages per thread
        #[arg(long, default_value_t = 100_000)]
        messages: usize,
    },
}

fn single(logger: &FileLogger, iterations: usize) {
    for i in 0..iterations {
        clog::debug!(logger, "this is a debug message, round {}", i);
        clog::info!(logger, "this is an info message, round {}", i);
        clog::warn!(logger, "this is a warning, round {}", i);
        clog::error!(logger, "this is an error, round {}", i);
        clog::fatal!(logger, "this is a fatal error, round {}", i);
    }
}

fn threads(logger: &Arc<FileLogger>, messages: usize) -> Result<()> {
    let handles: Vec<_> = Level::ALL
        .into_iter()
        .map(|level| {
            let logger = Arc::clone(logger);
            thread::Builder::new()
                .name(format!("clog-{level}"))
                .spawn(move || {
                    for i in 0..messages {
                        clog::log!(
                            logger,
                            level,
                            "this is a {} message from {:?}, #{}",
                            level,
                            thread::current().id(),
                            i
                        );
                    }
                })
                .context("failed to spawn writer thread")
        })
        .collect::<Result<_>>()?;

    for handle in handles {
        if handle.join().is_err() {
            bail!("writer thread panicked");
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    ensure_parent(&args.path)?;

    let logger = Arc::new(
        FileLogger::builder(&args.path)
            .level(args.level)
            .rotation_threshold(args.threshold)
            .open()?,
    );

    let started = Instant::now();
    match args.mode {
        Mode::Single { iterations } => single(&logger, iterations),
        Mode::Threads { messages } => threads(&logger, messages)?,
    }
    let elapsed = started.elapsed();

    info!(
        "Wrote to {} in {:.3}s across {} file(s)",
        args.path.display(),
        elapsed.as_secs_f64(),
        logger.rotations()
    );
    println!("{:.3}", elapsed.as_secs_f64());

    logger.close()?;
    Ok(())
}

//! Routing `tracing` events into a file logger
#![cfg(feature = "tracing-compat")]

use chrono::NaiveDate;
use clog::compat::init_tracing_bridge;
use clog::{Clock, FileLogger, Level, ManualClock};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_global_bridge_writes_application_events() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap(),
    );
    let logger = Arc::new(
        FileLogger::builder(dir.path().join("bridged"))
            .clock(Arc::new(clock) as Arc<dyn Clock>)
            .level(Level::Info)
            .rotation_threshold(10)
            .open()
            .unwrap(),
    );

    init_tracing_bridge(Arc::clone(&logger)).unwrap();
    assert!(init_tracing_bridge(Arc::clone(&logger)).is_err());

    tracing::debug!(target: "radar", "filtered by the floor");
    let line = line!() + 1;
    tracing::warn!(target: "radar", azimuth = 270, "track lost");

    // Rotations triggered above log through tracing themselves; those are
    // skipped instead of recursing into the same logger.
    let path = logger.current_path().unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        text,
        format!(
            "2025-01-01 06:00:00 WARN {}:{} track lost azimuth=270\n",
            file!(),
            line
        )
    );

    clog::slog!("console only {}", 1);
}

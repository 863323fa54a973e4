//! Level filtering and line format

use chrono::{NaiveDate, NaiveDateTime};
use clog::{Clock, FileLogger, Level, ManualClock};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 30)
        .unwrap()
        .and_hms_opt(12, 0, 5)
        .unwrap()
}

fn logger_at(dir: &TempDir, name: &str) -> FileLogger {
    FileLogger::builder(dir.path().join(name))
        .clock(Arc::new(ManualClock::new(noon())) as Arc<dyn Clock>)
        .open()
        .expect("Failed to create logger")
}

fn contents(logger: &FileLogger) -> String {
    fs::read_to_string(logger.current_path().expect("no current file")).unwrap()
}

#[test]
fn test_floor_filters_every_lower_level() {
    let dir = TempDir::new().unwrap();

    for floor in Level::ALL {
        let logger = logger_at(&dir, &format!("floor-{floor}"));
        logger.set_level(floor);

        for level in Level::ALL {
            clog::log!(logger, level, "at {}", level);
        }

        let written: Vec<String> = contents(&logger)
            .lines()
            .map(|line| line.split(' ').nth(2).unwrap().to_string())
            .collect();
        let expected: Vec<String> = Level::ALL
            .into_iter()
            .filter(|level| *level >= floor)
            .map(|level| level.to_string())
            .collect();
        assert_eq!(written, expected, "floor {floor}");
    }
}

#[test]
fn test_warn_floor_keeps_only_error() {
    let dir = TempDir::new().unwrap();
    let logger = FileLogger::create(dir.path().join("x")).unwrap();
    logger.set_level(Level::Warn);

    clog::debug!(logger, "debug {}", 1);
    let error_line = line!() + 1;
    clog::error!(logger, "error {}", 2);

    let text = contents(&logger);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);

    let line = lines[0];
    let (date, rest) = line.split_at(10);
    assert!(NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok(), "{line}");
    let (time, rest) = rest[1..].split_at(8);
    assert!(chrono::NaiveTime::parse_from_str(time, "%H:%M:%S").is_ok(), "{line}");
    assert_eq!(rest, format!(" ERROR {}:{} error 2", file!(), error_line));
    assert!(text.ends_with('\n'));
}

#[test]
fn test_exact_line_layout() {
    let dir = TempDir::new().unwrap();
    let logger = logger_at(&dir, "layout");

    logger.emit(Level::Info, "radar.c", 88, format_args!("sweep {} of {}", 3, 12));
    logger.emit(Level::Fatal, "radar.c", 90, format_args!("{}", "this is a fatal error"));

    assert_eq!(
        contents(&logger),
        "2024-06-30 12:00:05 INFO radar.c:88 sweep 3 of 12\n\
         2024-06-30 12:00:05 FATAL radar.c:90 this is a fatal error\n"
    );
}

#[test]
fn test_lines_visible_without_close() {
    let dir = TempDir::new().unwrap();
    let logger = logger_at(&dir, "visible");

    for i in 0..3 {
        clog::info!(logger, "line {i}");
        assert_eq!(contents(&logger).lines().count(), i + 1);
    }
}

#[test]
fn test_empty_message() {
    let dir = TempDir::new().unwrap();
    let logger = logger_at(&dir, "empty");

    logger.emit(Level::Info, "a.rs", 1, format_args!(""));

    assert_eq!(contents(&logger), "2024-06-30 12:00:05 INFO a.rs:1 \n");
}

#[test]
fn test_macros_accept_shared_and_absent_loggers() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(logger_at(&dir, "shared"));
    let absent: Option<Arc<FileLogger>> = None;
    let present = Some(Arc::clone(&logger));

    clog::warn!(absent, "never written");
    clog::warn!(present, "via option");
    clog::fatal!(logger, "via arc");
    clog::info!(&*logger, "via reference");

    let text = contents(&logger);
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("never written"));
}

#[test]
fn test_floor_change_applies_to_later_messages() {
    let dir = TempDir::new().unwrap();
    let logger = logger_at(&dir, "floor-change");

    clog::debug!(logger, "before");
    logger.set_level(Level::Error);
    clog::debug!(logger, "after");
    assert_eq!(logger.level(), Level::Error);

    let text = contents(&logger);
    assert!(text.contains("before"));
    assert!(!text.contains("after"));
}

#[test]
fn test_failing_display_drops_message() {
    struct Broken;

    impl std::fmt::Display for Broken {
        fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    let dir = TempDir::new().unwrap();
    let logger = logger_at(&dir, "broken");

    clog::error!(logger, "value {}", Broken);
    let next_line = line!() + 1;
    clog::error!(logger, "next");

    assert_eq!(
        contents(&logger),
        format!("2024-06-30 12:00:05 ERROR {}:{} next\n", file!(), next_line)
    );
}

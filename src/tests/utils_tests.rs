//! Tests for the file logger and progress tracker

extern crate std;

use std::fs;

use tempfile::tempdir;

use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

#[test]
fn test_logger_writes_lines_and_sections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("terrakit.log");
    let logger = Logger::new(path.to_str().unwrap()).unwrap();

    logger.log("converted 1 coordinate").unwrap();
    logger
        .log_section(
            "Image dem.pgm",
            &[("Size".to_string(), "3x2".to_string()), ("Channel".to_string(), "uint16".to_string())],
        )
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    std::assert_eq!(
        lines,
        vec!["converted 1 coordinate", "Image dem.pgm:", "  Size: 3x2", "  Channel: uint16"]
    );
}

#[test]
fn test_disabled_logger_accepts_lines() {
    let logger = Logger::disabled();
    std::assert!(logger.log("dropped").is_ok());
    std::assert!(!log::Log::enabled(&logger, &log::Metadata::builder().level(log::Level::Error).build()));
}

#[test]
fn test_hidden_progress_counts() {
    let progress = ProgressTracker::hidden(4);
    progress.increment(1);
    progress.increment(2);
    std::assert_eq!(progress.position(), 3);
    progress.finish();
}

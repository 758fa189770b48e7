//! Log recorder integration tests.
//!
//! Direct recorder calls and `tracing` events share one file and one layout.

use chrono::NaiveDateTime;
use std::fs;
use tabula_core::logging::{LogRecorder, TIMESTAMP_FORMAT, file_subscriber};
use tempfile::TempDir;

fn split_record(line: &str) -> (&str, &str, &str) {
    let rest = line.strip_prefix('[').unwrap();
    let (level, rest) = rest.split_once("] [").unwrap();
    let (timestamp, message) = rest.split_once("] ").unwrap();
    (level, timestamp, message)
}

#[test]
fn test_recorder_and_tracing_share_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs/nvim/tabula.log");
    let recorder = LogRecorder::initialize(&path).unwrap();

    recorder.debugf("Parsed {} flags", &[&9]).unwrap();
    tracing::subscriber::with_default(file_subscriber(recorder.clone(), true), || {
        tracing::debug!("Dispatching ping on MySQL");
        tracing::warn!("Unknown border style 9, using the default");
    });
    recorder.error("Failed to connect to MySQL").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let records: Vec<_> = content.lines().map(split_record).collect();

    let levels: Vec<_> = records.iter().map(|(level, _, _)| *level).collect();
    assert_eq!(levels, vec!["DEBUG", "DEBUG", "WARN", "ERROR"]);
    assert_eq!(records[0].2, "Parsed 9 flags");
    assert_eq!(records[1].2, "Dispatching ping on MySQL");
    assert_eq!(records[3].2, "Failed to connect to MySQL");

    for (_, timestamp, _) in &records {
        assert!(NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok());
    }
}

#[test]
fn test_two_recorders_append_to_one_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shared.log");

    let first = LogRecorder::initialize(&path).unwrap();
    let second = LogRecorder::initialize(&path).unwrap();
    first.debug("one").unwrap();
    second.debug("two").unwrap();
    first.error("three").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let messages: Vec<_> = content.lines().map(|line| split_record(line).2).collect();
    assert_eq!(messages, vec!["one", "two", "three"]);
}

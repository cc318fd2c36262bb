//! Contract Test: End-to-End Update
//!
//! One run against a stale record, with the real file audit log.
//!
//! Scenario:
//! - Target `home.example.net`, password `secret`, logging enabled
//! - Public IP `198.51.100.9`, DNS still `198.51.100.5`
//!
//! Expected:
//! - Provider called once with `ip=198.51.100.9`
//! - Outcome `Updated`
//! - One UPDATE line appended to the log file

mod common;

use common::*;
use ddns_core::{FileAuditLog, Reconciler, UpdateOutcome};

#[tokio::test]
async fn stale_record_is_updated_and_logged() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("updateLog.txt");
    let provider = RecordingProvider::accepting();
    let config = minimal_config(true);

    let reconciler = Reconciler::new(
        Box::new(FakeIpSource::returning("198.51.100.9\n")),
        Box::new(FakeHostResolver::returning(&["198.51.100.5"])),
        Box::new(provider.clone()),
        Box::new(FileAuditLog::new(&log_path)),
        &config,
    )
    .with_clock(Box::new(FixedClock(fixed_time())));

    let outcome = reconciler.reconcile(&config.target()).await;

    assert_eq!(
        outcome,
        UpdateOutcome::Updated {
            previous_ip: "198.51.100.5".to_string(),
            new_ip: "198.51.100.9".to_string(),
        }
    );

    let updates = provider.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].ip, "198.51.100.9");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(
        contents,
        "UPDATE: 2026/03/14 09:26:53 home.example.net,198.51.100.5,198.51.100.9,DNS record updated\n"
    );
}

#[tokio::test]
async fn second_run_appends_to_existing_log() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("updateLog.txt");
    std::fs::write(&log_path, "PASS: earlier line\n").unwrap();
    let config = minimal_config(true);

    Reconciler::new(
        Box::new(FakeIpSource::returning("198.51.100.9")),
        Box::new(FakeHostResolver::returning(&["198.51.100.9"])),
        Box::new(RecordingProvider::accepting()),
        Box::new(FileAuditLog::new(&log_path)),
        &config,
    )
    .with_clock(Box::new(FixedClock(fixed_time())))
    .reconcile(&config.target())
    .await;

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "PASS: earlier line");
    assert!(lines[1].starts_with("PASS: 2026/03/14 09:26:53 home.example.net,"));
}

#[tokio::test]
async fn unwritable_log_still_completes_update() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("missing").join("updateLog.txt");
    let provider = RecordingProvider::accepting();
    let config = minimal_config(true);

    let outcome = Reconciler::new(
        Box::new(FakeIpSource::returning("198.51.100.9")),
        Box::new(FakeHostResolver::returning(&["198.51.100.5"])),
        Box::new(provider.clone()),
        Box::new(FileAuditLog::new(&log_path)),
        &config,
    )
    .reconcile(&config.target())
    .await;

    assert!(matches!(outcome, UpdateOutcome::Updated { .. }));
    assert_eq!(provider.call_count(), 1);
    assert!(!log_path.exists());
}

//! Integration tests for timewardend
//!
//! These tests verify end-to-end behavior over an on-disk store: the
//! signal-to-block path, and that usage and the blocklist survive a
//! service restart.

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use timewarden_api::BlockedItem;
use timewarden_config::{parse_settings, Settings};
use timewarden_core::{Engine, EngineEvent, RecordingDispatcher};
use timewarden_store::{ConfigStore, SqliteStore};
use timewarden_util::{GroupId, MonotonicInstant};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn seeded_store(dir: &std::path::Path, limit_minutes: u64) -> Arc<SqliteStore> {
    let store = Arc::new(SqliteStore::open(dir.join("timewarden.db")).unwrap());
    store
        .save_blocked_items(&[
            BlockedItem::app("com.example.game", "Game"),
            BlockedItem::website("videos.example", "Videos"),
        ])
        .unwrap();
    store
        .save_group_limit_minutes(&GroupId::default_group(), limit_minutes)
        .unwrap();
    store.save_last_reset_day(day(1)).unwrap();
    store
}

#[test]
fn test_signal_to_block_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path(), 1);
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let mut engine = Engine::new(&Settings::default(), store, dispatcher.clone(), day(1));

    let start = MonotonicInstant::now();

    // App comes to the foreground, stays 90 seconds, then goes away.
    engine.handle_foreground(Some("com.example.game"), None, start, day(1));
    let events =
        engine.handle_foreground(None, None, start + Duration::from_secs(90), day(1));

    assert_eq!(dispatcher.request_count(), 1);
    assert_eq!(dispatcher.requests()[0].identifier, "com.example.game");
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::BlockRequested { .. })));
}

#[test]
fn test_usage_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let start = MonotonicInstant::now();

    {
        let store = seeded_store(dir.path(), 60);
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mut engine = Engine::new(&Settings::default(), store, dispatcher, day(1));

        engine.handle_foreground(Some("com.example.game"), None, start, day(1));
        engine.shutdown(start + Duration::from_secs(45));
    }

    // Service restart: the committed usage is still there.
    let store = Arc::new(SqliteStore::open(dir.path().join("timewarden.db")).unwrap());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let engine = Engine::new(&Settings::default(), store, dispatcher, day(1));

    let snapshot = engine.usage_snapshot();
    assert_eq!(
        snapshot.group_usage_millis[&GroupId::default_group()],
        45_000
    );
    assert_eq!(snapshot.item_usage_millis["com.example.game"], 45_000);
}

#[test]
fn test_restart_on_new_day_resets_usage() {
    let dir = tempfile::tempdir().unwrap();
    let start = MonotonicInstant::now();

    {
        let store = seeded_store(dir.path(), 60);
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mut engine = Engine::new(&Settings::default(), store, dispatcher, day(1));
        engine.handle_foreground(Some("com.example.game"), None, start, day(1));
        engine.shutdown(start + Duration::from_secs(30));
    }

    let store = Arc::new(SqliteStore::open(dir.path().join("timewarden.db")).unwrap());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let engine = Engine::new(&Settings::default(), store.clone(), dispatcher, day(2));

    let snapshot = engine.usage_snapshot();
    assert_eq!(snapshot.group_usage_millis[&GroupId::default_group()], 0);
    assert!(snapshot.item_usage_millis.is_empty());
    assert_eq!(store.load_last_reset_day(), Some(day(2)));
}

#[test]
fn test_seeded_blocklist_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first_items = {
        let store = Arc::new(SqliteStore::open(dir.path().join("timewarden.db")).unwrap());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let engine = Engine::new(&Settings::default(), store, dispatcher, day(1));
        engine.registry().items().to_vec()
    };
    assert!(!first_items.is_empty());

    let store = Arc::new(SqliteStore::open(dir.path().join("timewarden.db")).unwrap());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let engine = Engine::new(&Settings::default(), store, dispatcher, day(1));

    assert_eq!(engine.registry().items(), &first_items[..]);
}

#[test]
fn test_config_parsing() {
    let config = r#"
        config_version = 1

        [service]
        check_interval_secs = 10
        block_command = ["notify-send", "Blocked"]
        browsers = ["chrome", "firefox"]
        default_group_limit_minutes = 90
    "#;

    let settings = parse_settings(config).unwrap();
    assert_eq!(settings.check_interval, Duration::from_secs(10));
    assert_eq!(
        settings.block_command,
        Some(vec!["notify-send".to_string(), "Blocked".to_string()])
    );
    assert_eq!(settings.browsers, vec!["chrome", "firefox"]);
    assert_eq!(settings.default_group_limit_minutes, 90);
}

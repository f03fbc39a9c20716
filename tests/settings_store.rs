//! Settings persistence against a real filesystem.
//!
//! Covers the first-run file creation, the fallback path for files the user
//! has broken mid-edit, forward compatibility with unknown keys, and the
//! mtime-based change detection the daemon polls.

use std::fs;
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;
use xsnap::config::{MarginConfig, Settings, SettingsStore};

/// Store rooted in a fresh temp directory, two levels deep so the parent
/// directories have to be created too.
fn store_in(dir: &TempDir) -> SettingsStore {
    SettingsStore::at(dir.path().join("xsnap").join("config.json"))
}

#[test]
fn first_run_writes_a_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let settings = store.load_or_init().unwrap();
    assert_eq!(settings, Settings::default());

    assert!(store.path().exists(), "default file should be written");
    let on_disk: Settings = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(on_disk, Settings::default());
}

#[test]
fn malformed_files_fall_back_without_being_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "{ not json").unwrap();

    assert!(store.load().is_err(), "strict load should reject the file");

    let settings = store.load_or_init().unwrap();
    assert_eq!(settings, Settings::default());

    // The user's broken edit is left in place for them to fix.
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
}

#[test]
fn partial_files_fill_missing_keys_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), r#"{"margins": {"outer": 12, "gap": 6}}"#).unwrap();

    let settings = store.load().unwrap();
    assert_eq!(settings.margins, MarginConfig { outer: 12, gap: 6 });
    assert_eq!(settings.tolerance_px, Settings::default().tolerance_px);
    assert_eq!(settings.notify_on_launch, Settings::default().notify_on_launch);
}

#[test]
fn unknown_keys_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(
        store.path(),
        r#"{"tolerance_px": 4, "theme": "dark", "hotkeys": []}"#,
    )
    .unwrap();

    let settings = store.load().unwrap();
    assert_eq!(settings.tolerance_px, 4);
}

#[test]
fn save_then_load_round_trips_without_leaving_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let settings = Settings {
        margins: MarginConfig { outer: 14, gap: 4 },
        tolerance_px: 12,
        notify_on_apply: true,
        notify_on_launch: false,
    };
    store.save(&settings).unwrap();

    assert_eq!(store.load().unwrap(), settings);
    assert!(
        !store.path().with_extension("tmp").exists(),
        "atomic write should clean up its temp file"
    );
}

#[test]
fn change_detection_tracks_outside_edits() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.load_or_init().unwrap();
    assert!(!store.changed_on_disk(), "fresh file should read as current");

    // Filesystems with coarse timestamps need the edit to land in a later
    // second than the write above.
    sleep(Duration::from_millis(1100));
    fs::write(store.path(), r#"{"tolerance_px": 20}"#).unwrap();
    assert!(store.changed_on_disk(), "outside edit should be noticed");

    assert_eq!(store.load().unwrap().tolerance_px, 20);
    assert!(
        !store.changed_on_disk(),
        "loading should record the new mtime"
    );
}

#[test]
fn a_missing_file_reports_no_change() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert!(!store.changed_on_disk());
}

//! Tests for Store
//!
//! These tests verify:
//! - Basic get/set/timestamps/delete operations
//! - Creation timestamp carry-forward across overwrites
//! - Empty value and malformed entry handling
//! - Error wrapping with operation and key
//! - Store lifecycle (open, root handling)

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use flatkv::{Config, FlatKvError, OpKind, Store, WriteMode};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn setup_temp_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();
    (temp_dir, store)
}

fn setup_temp_store_with_mode(mode: WriteMode) -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .root_dir(temp_dir.path())
        .write_mode(mode)
        .build();
    let store = Store::open(config).unwrap();
    (temp_dir, store)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_get_on_empty_store() {
    let (_temp, store) = setup_temp_store();

    let err = store.get("a").unwrap_err();

    assert!(err.is_not_exist());
    assert!(matches!(
        err,
        FlatKvError::Op { op: OpKind::Get, ref key, .. } if key == "a"
    ));
}

#[test]
fn test_set_get() {
    let (_temp, store) = setup_temp_store();

    store.set("a", "12", ts(0)).unwrap();
    assert_eq!(store.get("a").unwrap(), "12");

    store.set("b", "13", ts(0)).unwrap();
    assert_eq!(store.get("b").unwrap(), "13");

    store.set("a", "14", ts(1)).unwrap();
    assert_eq!(store.get("a").unwrap(), "14");
    assert_eq!(store.get("b").unwrap(), "13");
}

#[test]
fn test_set_delimiter_in_value() {
    let (_temp, store) = setup_temp_store();

    store.set("foo", "ba,r", ts(0)).unwrap();

    assert_eq!(store.get("foo").unwrap(), "ba,r");
}

#[test]
fn test_set_writes_expected_file() {
    let (temp, store) = setup_temp_store();

    store.set("foo", "bar", ts(3)).unwrap();
    store.set("foo", "baz", ts(8)).unwrap();

    assert_eq!(fs::read_to_string(temp.path().join("foo")).unwrap(), "3,8,baz");
    assert_eq!(store.path_for("foo").unwrap(), temp.path().join("foo"));
}

#[test]
fn test_delete() {
    let (temp, store) = setup_temp_store();

    store.set("a", "12", ts(0)).unwrap();
    store.delete("a").unwrap();

    assert!(store.get("a").unwrap_err().is_not_exist());
    assert!(file_names(temp.path()).is_empty());
}

#[test]
fn test_delete_nonexistent_key() {
    let (_temp, store) = setup_temp_store();

    store.delete("nothing").unwrap();
}

#[test]
fn test_delete_twice() {
    let (_temp, store) = setup_temp_store();

    store.set("a", "1", ts(0)).unwrap();
    store.delete("a").unwrap();
    store.delete("a").unwrap();
}

#[test]
fn test_set_after_delete_resets_creation_time() {
    let (_temp, store) = setup_temp_store();

    store.set("a", "1", ts(0)).unwrap();
    store.delete("a").unwrap();
    store.set("a", "2", ts(5)).unwrap();

    assert_eq!(store.timestamps("a").unwrap(), (ts(5), ts(5)));
}

// =============================================================================
// Timestamp Tests
// =============================================================================

#[test]
fn test_first_write_timestamps() {
    let (_temp, store) = setup_temp_store();

    store.set("a", "12", ts(0)).unwrap();

    assert_eq!(store.timestamps("a").unwrap(), (ts(0), ts(0)));
}

#[test]
fn test_timestamp_carry_forward() {
    let (_temp, store) = setup_temp_store();

    store.set("a", "12", ts(0)).unwrap();
    store.set("a", "13", ts(1)).unwrap();
    assert_eq!(store.timestamps("a").unwrap(), (ts(0), ts(1)));

    store.set("a", "14", ts(1_700_000_000)).unwrap();
    assert_eq!(store.timestamps("a").unwrap(), (ts(0), ts(1_700_000_000)));
}

#[test]
fn test_timestamps_truncated_to_seconds() {
    let (_temp, store) = setup_temp_store();
    let now = DateTime::from_timestamp(42, 750_000_000).unwrap();

    store.set("a", "v", now).unwrap();

    assert_eq!(store.timestamps("a").unwrap(), (ts(42), ts(42)));
}

#[test]
fn test_timestamps_nonexistent_key() {
    let (_temp, store) = setup_temp_store();

    let err = store.timestamps("a").unwrap_err();

    assert!(err.is_not_exist());
    assert!(matches!(err, FlatKvError::Op { op: OpKind::Timestamps, .. }));
}

#[test]
fn test_set_before_creation_time_rejected() {
    let (temp, store) = setup_temp_store();

    store.set("a", "12", ts(10)).unwrap();
    let err = store.set("a", "13", ts(5)).unwrap_err();

    assert!(err.is_bad_format());
    assert_eq!(fs::read_to_string(temp.path().join("a")).unwrap(), "10,10,12");
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_set_empty_value_rejected() {
    let (temp, store) = setup_temp_store();

    let err = store.set("a", "", ts(0)).unwrap_err();

    assert!(err.is_bad_format());
    assert!(matches!(err, FlatKvError::Op { op: OpKind::Set, .. }));
    assert!(file_names(temp.path()).is_empty());
}

#[test]
fn test_set_empty_value_keeps_prior_file() {
    let (temp, store) = setup_temp_store();

    store.set("a", "12", ts(0)).unwrap();
    let err = store.set("a", "", ts(1)).unwrap_err();

    assert!(err.is_bad_format());
    assert_eq!(fs::read_to_string(temp.path().join("a")).unwrap(), "0,0,12");
    assert_eq!(store.timestamps("a").unwrap(), (ts(0), ts(0)));
}

#[test]
fn test_malformed_entry_reported() {
    let (temp, store) = setup_temp_store();
    fs::write(temp.path().join("a"), "0,alpha,bar").unwrap();

    assert!(store.get("a").unwrap_err().is_bad_format());
    assert!(store.timestamps("a").unwrap_err().is_bad_format());
}

#[test]
fn test_set_over_malformed_entry_fails() {
    let (temp, store) = setup_temp_store();
    fs::write(temp.path().join("a"), "0,0,").unwrap();

    let err = store.set("a", "new", ts(1)).unwrap_err();

    assert!(err.is_bad_format());
    assert_eq!(fs::read_to_string(temp.path().join("a")).unwrap(), "0,0,");
}

#[test]
fn test_set_over_unreadable_entry_propagates_io_error() {
    let (temp, store) = setup_temp_store();
    fs::create_dir(temp.path().join("a")).unwrap();
    fs::write(temp.path().join("a").join("inner"), "x").unwrap();

    let err = store.set("a", "new", ts(1)).unwrap_err();

    assert!(matches!(
        err,
        FlatKvError::Op { op: OpKind::Set, ref key, .. } if key == "a"
    ));
    assert!(matches!(err.root_cause(), FlatKvError::Io(_)));
    assert!(temp.path().join("a").is_dir());
    assert_eq!(file_names(&temp.path().join("a")), vec!["inner"]);
    assert_eq!(fs::read_to_string(temp.path().join("a").join("inner")).unwrap(), "x");
}

#[test]
fn test_delete_malformed_entry() {
    let (temp, store) = setup_temp_store();
    fs::write(temp.path().join("a"), "garbage").unwrap();

    store.delete("a").unwrap();

    assert!(file_names(temp.path()).is_empty());
}

#[test]
fn test_invalid_key_rejected_by_every_operation() {
    let (temp, store) = setup_temp_store();

    assert!(store.get("../escape").unwrap_err().is_invalid_key());
    assert!(store.set("../escape", "v", ts(0)).unwrap_err().is_invalid_key());
    assert!(store.timestamps("a/b").unwrap_err().is_invalid_key());
    assert!(store.delete("..").unwrap_err().is_invalid_key());

    assert!(file_names(temp.path()).is_empty());
    assert!(!temp.path().parent().unwrap().join("escape").exists());
}

// =============================================================================
// Error Display Tests
// =============================================================================

#[test]
fn test_error_message_names_operation_and_key() {
    let (_temp, store) = setup_temp_store();

    let get_err = store.get("missing").unwrap_err().to_string();
    assert_eq!(get_err, "error getting key missing: key does not exist");

    let ts_err = store.timestamps("missing").unwrap_err().to_string();
    assert_eq!(
        ts_err,
        "error getting timestamps for missing: key does not exist"
    );

    let set_err = store.set("missing", "", ts(0)).unwrap_err().to_string();
    assert!(set_err.starts_with("error setting key missing: malformed data"));
}

#[test]
fn test_root_cause_unwraps_op() {
    let (_temp, store) = setup_temp_store();

    let err = store.get("missing").unwrap_err();

    assert!(matches!(err.root_cause(), FlatKvError::NotExist));
}

// =============================================================================
// Write Mode Tests
// =============================================================================

#[test]
fn test_atomic_mode_round_trip() {
    let (temp, store) = setup_temp_store_with_mode(WriteMode::Atomic);

    store.set("a", "1", ts(0)).unwrap();
    store.set("a", "2", ts(4)).unwrap();
    store.set("b", "x,y", ts(4)).unwrap();

    assert_eq!(store.get("a").unwrap(), "2");
    assert_eq!(store.get("b").unwrap(), "x,y");
    assert_eq!(store.timestamps("a").unwrap(), (ts(0), ts(4)));
    assert_eq!(file_names(temp.path()), vec!["a", "b"]);
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_open_creates_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("nested").join("db");

    let store = Store::open_path(&root).unwrap();

    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn test_open_without_create_requires_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("db");

    let config = Config::builder().root_dir(&root).create_root(false).build();
    let result = Store::open(config);

    assert!(matches!(result, Err(FlatKvError::Config(_))));
    assert!(!root.exists());
}

#[test]
fn test_open_without_create_existing_root() {
    let temp_dir = TempDir::new().unwrap();

    let config = Config::builder()
        .root_dir(temp_dir.path())
        .create_root(false)
        .build();
    let store = Store::open(config).unwrap();

    store.set("k", "v", ts(0)).unwrap();
    assert_eq!(store.get("k").unwrap(), "v");
    assert!(!store.config().create_root);
}

#[test]
fn test_reopen_sees_existing_entries() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = Store::open_path(temp_dir.path()).unwrap();
        store.set("persist", "yes", ts(7)).unwrap();
    }

    let store = Store::open_path(temp_dir.path()).unwrap();
    assert_eq!(store.get("persist").unwrap(), "yes");
    assert_eq!(store.timestamps("persist").unwrap(), (ts(7), ts(7)));
}

#[test]
fn test_stores_are_isolated_by_root() {
    let (_temp_a, store_a) = setup_temp_store();
    let (_temp_b, store_b) = setup_temp_store();

    store_a.set("k", "a", ts(0)).unwrap();

    assert!(store_b.get("k").unwrap_err().is_not_exist());
}

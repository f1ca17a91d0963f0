//! Store handle and key-value operations

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SubsecRound, Utc};
use tracing::debug;

use super::key::validate_key;
use crate::config::Config;
use crate::entry::{self, Entry};
use crate::error::{FlatKvError, OpKind, Result};

/// Handle to a directory-backed key-value store
///
/// ## Concurrency Model
///
/// None. Each operation is one synchronous read and/or write against one
/// file, with no locking. Two processes or threads touching the same key
/// at the same time are unserialized: a reader may see a partial write
/// (use `WriteMode::Atomic` to avoid that) and racing writers may lose
/// an update or the creation timestamp.
#[derive(Debug, Clone)]
pub struct Store {
    /// Store configuration, including the storage root
    config: Config,
}

impl Store {
    /// Open a store rooted at `config.root_dir`
    ///
    /// Creates the root when `create_root` is set, otherwise requires it
    /// to be an existing directory.
    pub fn open(config: Config) -> Result<Self> {
        let root = &config.root_dir;

        if config.create_root {
            fs::create_dir_all(root)?;
        } else if !root.is_dir() {
            return Err(FlatKvError::Config(format!(
                "storage root {} is not a directory",
                root.display()
            )));
        }

        debug!(root = %root.display(), write_mode = ?config.write_mode, "opened store");
        Ok(Self { config })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified storage root
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().root_dir(path).build())
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Get the value stored for `key`
    pub fn get(&self, key: &str) -> Result<String> {
        self.read_entry(key)
            .map(|entry| entry.value)
            .map_err(|e| e.with_op(OpKind::Get, key))
    }

    /// Store `value` under `key`, stamped with `now`
    ///
    /// A new key gets `now` as both timestamps. An existing key keeps its
    /// creation timestamp. An existing file that cannot be decoded is left
    /// untouched and its error returned.
    pub fn set(&self, key: &str, value: &str, now: DateTime<Utc>) -> Result<()> {
        self.try_set(key, value, now)
            .map_err(|e| e.with_op(OpKind::Set, key))
    }

    /// Get the `(first_edited, last_edited)` timestamps of `key`
    pub fn timestamps(&self, key: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        self.read_entry(key)
            .map(|entry| (entry.first_edited, entry.last_edited))
            .map_err(|e| e.with_op(OpKind::Timestamps, key))
    }

    /// Delete `key`; deleting a missing key succeeds
    pub fn delete(&self, key: &str) -> Result<()> {
        self.try_delete(key)
            .map_err(|e| e.with_op(OpKind::Delete, key))
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.config.root_dir.join(key))
    }

    // =========================================================================
    // Internals (errors not yet tagged with the operation)
    // =========================================================================

    fn read_entry(&self, key: &str) -> Result<Entry> {
        let path = self.path_for(key)?;
        entry::read_from(&path)
    }

    fn try_set(&self, key: &str, value: &str, now: DateTime<Utc>) -> Result<()> {
        let path = self.path_for(key)?;

        // Empty values never reach the existence check or the disk
        if value.is_empty() {
            return Err(FlatKvError::BadFormat(
                "storing empty \"\" is not allowed".to_string(),
            ));
        }

        let now = now.trunc_subsecs(0);
        let entry = match entry::read_from(&path) {
            Ok(existing) => existing.revised(value, now),
            Err(FlatKvError::NotExist) => Entry::created(value, now),
            Err(e) => return Err(e),
        };

        entry::write_to(&path, &entry, self.config.write_mode)?;

        debug!(
            key,
            first_edited = entry.first_edited.timestamp(),
            last_edited = entry.last_edited.timestamp(),
            "set key"
        );
        Ok(())
    }

    fn try_delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        entry::remove(&path)?;
        debug!(key, "deleted key");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the storage root directory
    pub fn root(&self) -> &Path {
        &self.config.root_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

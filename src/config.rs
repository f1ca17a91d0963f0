//! Configuration for flatkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a flatkv store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory holding one file per key
    /// Internal structure:
    ///   {root_dir}/
    ///     ├── <key>            (entry file)
    ///     └── .<key>.tmp       (transient, atomic writes only)
    pub root_dir: PathBuf,

    /// Create `root_dir` on open if it is missing
    pub create_root: bool,

    // -------------------------------------------------------------------------
    // Write Configuration
    // -------------------------------------------------------------------------
    /// How entry files are replaced on write
    pub write_mode: WriteMode,
}

/// Write strategy for entry files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite the file with a single write call (no crash safety)
    #[default]
    InPlace,

    /// Write a temp file in the same directory, fsync, then rename over the target
    Atomic,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            create_root: true,
            write_mode: WriteMode::InPlace,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage root directory
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Create the storage root on open if missing
    pub fn create_root(mut self, create: bool) -> Self {
        self.config.create_root = create;
        self
    }

    /// Set the write mode
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

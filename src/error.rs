//! Error types for flatkv
//!
//! Provides a unified error type for all operations.

use std::fmt;

use thiserror::Error;

/// Result type alias using FlatKvError
pub type Result<T> = std::result::Result<T, FlatKvError>;

/// Unified error type for flatkv operations
#[derive(Debug, Error)]
pub enum FlatKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Entry Errors
    // -------------------------------------------------------------------------
    #[error("key does not exist")]
    NotExist,

    #[error("malformed data: {0}")]
    BadFormat(String),

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Operation Context
    // -------------------------------------------------------------------------
    /// Any of the above, tagged with the store operation and key that hit it
    #[error("error {op} {key}: {source}")]
    Op {
        op: OpKind,
        key: String,
        #[source]
        source: Box<FlatKvError>,
    },
}

/// Store operation named in wrapped errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Get,
    Set,
    Timestamps,
    Delete,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpKind::Get => "getting key",
            OpKind::Set => "setting key",
            OpKind::Timestamps => "getting timestamps for",
            OpKind::Delete => "deleting key",
        };
        f.write_str(name)
    }
}

impl FlatKvError {
    /// Wrap this error with the operation and key that produced it
    pub fn with_op(self, op: OpKind, key: impl Into<String>) -> Self {
        FlatKvError::Op {
            op,
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through any `Op` wrappers
    pub fn root_cause(&self) -> &FlatKvError {
        let mut err = self;
        while let FlatKvError::Op { source, .. } = err {
            err = source;
        }
        err
    }

    pub fn is_not_exist(&self) -> bool {
        matches!(self.root_cause(), FlatKvError::NotExist)
    }

    pub fn is_bad_format(&self) -> bool {
        matches!(self.root_cause(), FlatKvError::BadFormat(_))
    }

    pub fn is_invalid_key(&self) -> bool {
        matches!(self.root_cause(), FlatKvError::InvalidKey { .. })
    }
}

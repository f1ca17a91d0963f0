//! Entry Module
//!
//! The persisted record for one key, its flat-file encoding, and the
//! single-path file primitives the store is built from.
//!
//! ## Responsibilities
//! - Encode/decode an entry to/from bytes
//! - Read, write and remove one entry file at a time
//! - Reject empty values before any I/O
//!
//! ## File Format
//! ```text
//! ┌──────────────────┬───┬─────────────────┬───┬──────────────────────┐
//! │ first_edited (s) │ , │ last_edited (s) │ , │ value (rest of file) │
//! └──────────────────┴───┴─────────────────┴───┴──────────────────────┘
//! ```
//! Timestamps are base-10 Unix seconds. The value may itself contain `,`;
//! only the first two delimiters split fields. No trailing newline.

pub mod codec;
mod file;

pub use codec::{decode, encode, DELIMITER};
pub use file::{read_from, remove, write_to};

use chrono::{DateTime, Utc};

/// A single key's record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// When the key was first set, never changed afterwards
    pub first_edited: DateTime<Utc>,

    /// When the key was last set
    pub last_edited: DateTime<Utc>,

    /// The stored value, never empty once persisted
    pub value: String,
}

impl Entry {
    pub fn new(
        first_edited: DateTime<Utc>,
        last_edited: DateTime<Utc>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            first_edited,
            last_edited,
            value: value.into(),
        }
    }

    /// Entry for a key written for the first time
    pub fn created(value: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(now, now, value)
    }

    /// Successor of this entry: new value, same creation time
    pub fn revised(&self, value: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(self.first_edited, now, value)
    }
}

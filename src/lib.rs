//! # flatkv
//!
//! A minimal durable key-value store with:
//! - One plain file per key under a storage root directory
//! - Creation and last-modified timestamps stored with every value
//! - Idempotent deletes and non-empty values enforced at the file layer
//! - Optional atomic (temp file + rename) writes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      flatkv CLI                              │
//! │                 (get / set / del / ts)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Store                                  │
//! │        (key validation, timestamp carry-forward)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │ File Access │
//!   │ (first,last,│          │ (read/write │
//!   │   value)    │          │  /remove)   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ {root}/<key>│
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod entry;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlatKvError, OpKind, Result};
pub use config::{Config, WriteMode};
pub use entry::Entry;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of flatkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

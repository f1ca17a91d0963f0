//! Store Module
//!
//! Key-value operations over a storage root directory.
//!
//! ## Responsibilities
//! - Validate keys and map them to entry files under the root
//! - Implement get/set/timestamps/delete on top of the entry layer
//! - Carry the creation timestamp forward across overwrites
//! - Tag every error with the operation and key

mod key;
mod ops;

pub use key::{validate_key, MAX_KEY_LEN};
pub use ops::Store;

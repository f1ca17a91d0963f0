//! Key validation
//!
//! Keys become file names directly under the storage root, so only a
//! conservative charset is accepted.

use crate::error::{FlatKvError, Result};

/// Longest accepted key, in bytes (common filesystem name limit)
pub const MAX_KEY_LEN: usize = 255;

/// Device names Windows reserves regardless of extension
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Check that `key` can be used as an entry file name
///
/// Accepted: 1..=255 bytes of ASCII letters, digits, `-`, `_` and `.`,
/// not starting with `.` and not a reserved device name.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(invalid(key, "key is empty"));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(invalid(
            key,
            format!("key is {} bytes, limit is {}", key.len(), MAX_KEY_LEN),
        ));
    }

    if key.starts_with('.') {
        return Err(invalid(key, "key must not start with '.'"));
    }

    if let Some(c) = key.chars().find(|&c| !is_key_char(c)) {
        return Err(invalid(key, format!("character {:?} is not allowed", c)));
    }

    let stem = key.split('.').next().unwrap_or(key);
    if RESERVED_NAMES.iter().any(|name| name.eq_ignore_ascii_case(stem)) {
        return Err(invalid(key, "key is a reserved device name"));
    }

    Ok(())
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

fn invalid(key: &str, reason: impl Into<String>) -> FlatKvError {
    FlatKvError::InvalidKey {
        key: key.to_string(),
        reason: reason.into(),
    }
}

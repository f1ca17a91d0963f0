//! Entry codec
//!
//! Pure encoding and decoding between [`Entry`] and its on-disk bytes.

use chrono::{DateTime, Utc};

use super::Entry;
use crate::error::{FlatKvError, Result};

/// Field separator in the encoded form
pub const DELIMITER: u8 = b',';

/// Number of fields in an encoded entry
const FIELD_COUNT: usize = 3;

// =============================================================================
// Encoding
// =============================================================================

/// Encode an entry to bytes
///
/// Format: first_edited + ',' + last_edited + ',' + value
///
/// Fails with `BadFormat` for an empty value, or when `first_edited` is
/// later than `last_edited` at seconds resolution.
pub fn encode(entry: &Entry) -> Result<Vec<u8>> {
    if entry.value.is_empty() {
        return Err(FlatKvError::BadFormat(
            "storing empty \"\" is not allowed".to_string(),
        ));
    }

    let first = entry.first_edited.timestamp();
    let last = entry.last_edited.timestamp();
    if first > last {
        return Err(FlatKvError::BadFormat(format!(
            "first-set timestamp {} is after last-set timestamp {}",
            first, last
        )));
    }

    let first = first.to_string();
    let last = last.to_string();

    let mut data = Vec::with_capacity(first.len() + last.len() + 2 + entry.value.len());
    data.extend_from_slice(first.as_bytes());
    data.push(DELIMITER);
    data.extend_from_slice(last.as_bytes());
    data.push(DELIMITER);
    data.extend_from_slice(entry.value.as_bytes());

    Ok(data)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode an entry from bytes
///
/// Splits on at most two delimiters; everything after the second one,
/// further delimiters included, is the value.
pub fn decode(data: &[u8]) -> Result<Entry> {
    let fields: Vec<&[u8]> = data.splitn(FIELD_COUNT, |&b| b == DELIMITER).collect();

    let &[first, last, value] = fields.as_slice() else {
        return Err(FlatKvError::BadFormat(format!(
            "missing value or timestamp {:?}",
            String::from_utf8_lossy(data)
        )));
    };

    let first_edited = parse_timestamp(first, "first-set")?;
    let last_edited = parse_timestamp(last, "last-set")?;

    if value.is_empty() {
        return Err(FlatKvError::BadFormat(format!(
            "missing value {:?}",
            String::from_utf8_lossy(data)
        )));
    }

    let value = String::from_utf8(value.to_vec())
        .map_err(|e| FlatKvError::BadFormat(format!("value is not valid UTF-8: {}", e)))?;

    Ok(Entry {
        first_edited,
        last_edited,
        value,
    })
}

/// Parse a base-10 Unix-seconds field
fn parse_timestamp(field: &[u8], which: &str) -> Result<DateTime<Utc>> {
    let text = String::from_utf8_lossy(field);

    let secs: i64 = text.parse().map_err(|e| {
        FlatKvError::BadFormat(format!(
            "could not parse {} timestamp {:?}: {}",
            which, text, e
        ))
    })?;

    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        FlatKvError::BadFormat(format!("{} timestamp {} is out of range", which, secs))
    })
}

//! Entry file access
//!
//! Reads, writes and removes the file backing one entry.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use super::{codec, Entry};
use crate::config::WriteMode;
use crate::error::{FlatKvError, Result};

/// Read and decode the entry stored at `path`
///
/// Returns `NotExist` if there is no file at `path`.
pub fn read_from(path: &Path) -> Result<Entry> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(FlatKvError::NotExist),
        Err(e) => return Err(e.into()),
    };

    trace!(path = %path.display(), bytes = data.len(), "read entry file");
    codec::decode(&data)
}

/// Encode `entry` and write it to `path`, creating or replacing the file
///
/// The entry is validated before the filesystem is touched, so a
/// rejected write never truncates an existing file.
pub fn write_to(path: &Path, entry: &Entry, mode: WriteMode) -> Result<()> {
    let data = codec::encode(entry)?;

    match mode {
        WriteMode::InPlace => fs::write(path, &data)?,
        WriteMode::Atomic => write_atomic(path, &data)?,
    }

    trace!(path = %path.display(), bytes = data.len(), ?mode, "wrote entry file");
    Ok(())
}

/// Remove the file at `path`; a missing file is not an error
pub fn remove(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            trace!(path = %path.display(), "removed entry file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Atomic Replace
// =============================================================================

/// Sibling temp file used while replacing `path`: `<dir>/.<name>.tmp`
fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("entry path {} has no file name", path.display()),
        )
    })?;

    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp = temp_path(path)?;

    let result = write_synced(&temp, data).and_then(|()| fs::rename(&temp, path));

    if result.is_err() {
        if let Err(e) = fs::remove_file(&temp) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %temp.display(), error = %e, "failed to clean up temp file");
            }
        }
    }

    result
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

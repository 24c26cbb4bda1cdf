//! Permission probes
//!
//! Readability and writability checks run by the guards and the remove
//! operation ahead of the actual filesystem call.

use std::fs;
use std::path::Path;

/// Whether the file at `path` can be opened for reading.
pub fn is_readable(path: &Path) -> bool {
    fs::File::open(path).is_ok()
}

/// Whether `path` (file or directory) is writable by this process.
///
/// Uses the metadata read-only bit, which on Unix reflects only the owner
/// write permission.
pub fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}

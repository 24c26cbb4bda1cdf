//! Filesystem primitives
//!
//! One operation per action, each consuming a path that already passed its
//! guard. Preconditions live in the guards; these functions only perform
//! the read or mutation and let untyped I/O errors propagate for the
//! dispatcher to fold.

use log::info;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::error::GatewayError;
use crate::gateway::permissions;
use crate::gateway::results::{SendBody, SendResult};
use crate::gateway::sanitize::SanitizedPath;
use crate::gateway::upload::UploadedPayload;

/// Describe the file for sending, choosing streamed or buffered delivery.
///
/// A positive reported size streams from disk; otherwise (empty or special
/// files whose stat size is unusable) the whole file is read into memory.
pub fn send_file(path: &Path) -> Result<SendResult, GatewayError> {
    let meta = fs::metadata(path)?;
    let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);

    let body = if meta.len() > 0 {
        SendBody::Streamed {
            path: path.to_path_buf(),
            len: meta.len(),
        }
    } else {
        SendBody::Buffered(fs::read(path)?)
    };

    Ok(SendResult {
        path: path.to_path_buf(),
        modified,
        body,
    })
}

/// Move the uploaded payload onto `dest`, overwriting any existing file.
pub fn save_file(dest: &Path, payload: UploadedPayload) -> Result<(), GatewayError> {
    let source = payload.spooled_path()?.to_path_buf();
    info!("moving {} to {}", source.display(), dest.display());
    payload.move_to(dest)
}

/// Append the payload's bytes to `dest`, creating it if absent.
pub fn append_file(dest: &Path, payload: &UploadedPayload) -> Result<(), GatewayError> {
    let mut source = fs::File::open(payload.spooled_path()?)?;
    let mut target = OpenOptions::new().append(true).create(true).open(dest)?;
    io::copy(&mut source, &mut target)?;
    Ok(())
}

/// Create `path` as an empty file, or refresh its modification time.
pub fn touch_file(path: &Path) -> Result<(), GatewayError> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    file.set_modified(SystemTime::now())?;
    Ok(())
}

/// Create the directory itself; the write guard already made its parents.
pub fn make_directory(path: &Path) -> Result<(), GatewayError> {
    fs::create_dir(path)?;
    Ok(())
}

/// Delete a file, or a directory only if empty.
///
/// Runs its own existence and writability checks instead of the write
/// guard; nothing may be created on the remove path. A non-empty directory
/// surfaces the OS error for the dispatcher to fold.
pub fn remove_path(path: &SanitizedPath) -> Result<String, GatewayError> {
    let real = path.real();

    if !real.exists() {
        return Err(GatewayError::NotFound(path.requested().to_string()));
    }
    if !permissions::is_writable(real) {
        return Err(GatewayError::Forbidden(format!(
            "Cannot modify {}",
            real.display()
        )));
    }

    if real.is_dir() {
        fs::remove_dir(real)?;
        info!("removed directory {}", real.display());
        Ok(format!("Removed directory {}", real.display()))
    } else {
        fs::remove_file(real)?;
        info!("removed file {}", real.display());
        Ok(format!("Removed file {}", real.display()))
    }
}

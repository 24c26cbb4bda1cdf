//! Uploaded payloads
//!
//! Wraps the multipart `file` field after the serving layer spools it to a
//! temporary file.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::GatewayError;

/// A client upload staged in a temporary file.
///
/// The temp file is removed on drop unless `Save` moves it into place.
#[derive(Debug)]
pub struct UploadedPayload {
    filename: String,
    spooled: Option<NamedTempFile>,
}

impl UploadedPayload {
    pub fn new(filename: String, spooled: NamedTempFile) -> Self {
        Self {
            filename,
            spooled: Some(spooled),
        }
    }

    /// A payload reference whose body never made it to disk.
    pub fn unspooled(filename: String) -> Self {
        Self {
            filename,
            spooled: None,
        }
    }

    /// Original client-supplied filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Path of the spooled temp file, or the typed failure reported when a
    /// payload reference arrives without one.
    pub fn spooled_path(&self) -> Result<&Path, GatewayError> {
        match &self.spooled {
            Some(file) => Ok(file.path()),
            None => Err(GatewayError::Forbidden("File was not uploaded".to_string())),
        }
    }

    /// Move the spooled file onto `dest`, overwriting any existing file.
    ///
    /// Rename first; falls back to a copy when the temp directory and the
    /// gateway root sit on different filesystems.
    pub fn move_to(mut self, dest: &Path) -> Result<(), GatewayError> {
        let Some(spooled) = self.spooled.take() else {
            return Err(GatewayError::Forbidden("File was not uploaded".to_string()));
        };

        match spooled.persist(dest) {
            Ok(_) => Ok(()),
            Err(err) => {
                fs::copy(err.file.path(), dest)?;
                Ok(())
            }
        }
    }
}

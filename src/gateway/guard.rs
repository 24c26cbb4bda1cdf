//! Access guards
//!
//! Pre-operation checks run between sanitization and execution. Each guard
//! takes the sanitized path and a continuation to run only when the check
//! passes, returning a typed failure otherwise.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::GatewayError;
use crate::gateway::permissions;
use crate::gateway::sanitize::SanitizedPath;

/// Run `op` only if `path` names an existing, readable regular file.
pub fn with_readable<T>(
    path: &SanitizedPath,
    op: impl FnOnce(&Path) -> Result<T, GatewayError>,
) -> Result<T, GatewayError> {
    let real = path.real();

    if !real.is_file() {
        return Err(GatewayError::NotFound(path.requested().to_string()));
    }
    if !permissions::is_readable(real) {
        return Err(GatewayError::Forbidden(format!(
            "Cannot read {}",
            real.display()
        )));
    }

    op(real)
}

/// Run `op` once the target is safe to create or overwrite.
///
/// Creates missing parent directories first. The parent is derived by
/// joining all but the final separator-delimited component; client paths
/// may mix `/` and `\`, so this deliberately avoids `Path::parent`.
pub fn with_modifiable<T>(
    path: &SanitizedPath,
    op: impl FnOnce(&Path) -> Result<T, GatewayError>,
) -> Result<T, GatewayError> {
    let real = path.real();
    let parent = parent_directory(real);

    if let Err(e) = fs::create_dir_all(&parent) {
        if e.kind() == ErrorKind::PermissionDenied {
            return Err(GatewayError::Forbidden(format!(
                "Cannot create directory {} due to {}",
                parent.display(),
                e
            )));
        }
        return Err(GatewayError::Io(e));
    }

    if !permissions::is_writable(&parent) {
        return Err(GatewayError::Forbidden(format!(
            "Cannot write to directory {}",
            parent.display()
        )));
    }

    if real.is_file() && !permissions::is_writable(real) {
        return Err(GatewayError::Forbidden(format!(
            "Cannot write to file {}",
            real.display()
        )));
    }

    op(real)
}

/// All but the last component of `path`, split on either separator.
fn parent_directory(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    match text.rfind(['/', '\\']) {
        Some(idx) if idx > 0 => PathBuf::from(&text[..idx]),
        _ => PathBuf::from("/"),
    }
}

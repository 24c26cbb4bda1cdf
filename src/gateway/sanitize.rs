//! Path sanitization
//!
//! Decodes and validates the client-supplied path before any filesystem
//! call sees it.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

use crate::error::GatewayError;

/// A decoded request path joined onto the gateway root.
///
/// Construction goes through [`sanitize`], so holders can rely on the path
/// being root-prefixed and free of the literal `..` sequence.
#[derive(Debug, Clone)]
pub struct SanitizedPath {
    real: PathBuf,
    requested: String,
}

impl SanitizedPath {
    /// The path to hand to filesystem primitives.
    pub fn real(&self) -> &Path {
        &self.real
    }

    /// The decoded path as the client supplied it, used in messages.
    pub fn requested(&self) -> &str {
        &self.requested
    }
}

/// Decode the raw URI path and join it onto `root`.
///
/// The traversal check is a substring test for `..` on the decoded string.
/// It does not canonicalize, normalize separators, or resolve symlinks, and
/// it does not re-check after further decoding.
pub fn sanitize(root: &Path, raw_path: &str) -> Result<SanitizedPath, GatewayError> {
    let decoded = percent_decode_str(raw_path)
        .decode_utf8_lossy()
        .into_owned();

    if decoded.contains("..") {
        return Err(GatewayError::Forbidden(format!("Illegal path {}", decoded)));
    }

    // Leading slashes would make join replace the root outright.
    let real = root.join(decoded.trim_start_matches('/'));
    Ok(SanitizedPath {
        real,
        requested: decoded,
    })
}

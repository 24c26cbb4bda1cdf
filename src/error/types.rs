//! Error types
//!
//! Defines the gateway's failure taxonomy. Everything a client can observe
//! is either `NotFound` or `Forbidden`; untyped I/O failures are folded into
//! `Forbidden` at the dispatcher boundary, so there is no separate internal
//! error category.

use std::fmt;
use std::io;

/// Failures raised anywhere in the request pipeline.
#[derive(Debug)]
pub enum GatewayError {
    /// The addressed path does not name an existing readable target.
    NotFound(String),
    /// Validation, permission, or unknown-action failure.
    Forbidden(String),
    /// An untyped I/O failure. The dispatcher converts these to `Forbidden`
    /// with action and path context before they reach a client.
    Io(io::Error),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::NotFound(p) => write!(f, "Path not found: {}", p),
            GatewayError::Forbidden(msg) => write!(f, "{}", msg),
            GatewayError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<io::Error> for GatewayError {
    fn from(error: io::Error) -> Self {
        GatewayError::Io(error)
    }
}

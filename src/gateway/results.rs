//! Operation results
//!
//! Descriptors returned by the executor for the response layer to render.

use std::path::PathBuf;
use std::time::SystemTime;

/// Body of a successful send, tagged so the transport can pick the right
/// transmission strategy without the core knowing about transports.
#[derive(Debug)]
pub enum SendBody {
    /// The file reports a usable size; stream it from disk.
    Streamed { path: PathBuf, len: u64 },
    /// No usable size (empty or special file); fully materialized bytes.
    /// Unbounded in memory for large special files.
    Buffered(Vec<u8>),
}

impl SendBody {
    pub fn len(&self) -> u64 {
        match self {
            SendBody::Streamed { len, .. } => *len,
            SendBody::Buffered(bytes) => bytes.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A successful send plus the metadata the response layer turns into
/// headers.
#[derive(Debug)]
pub struct SendResult {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub body: SendBody,
}

/// Outcome of one dispatched request.
#[derive(Debug)]
pub enum OperationOutcome {
    /// File contents for `Send`.
    Sent(SendResult),
    /// A mutation succeeded; short message for the client.
    Done(String),
}

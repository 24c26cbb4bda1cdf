//! Response assembly
//!
//! Maps operation outcomes and failures onto the HTTP-shaped
//! status/headers/body triple the serving layer transmits. Also the single
//! place failure kinds become status codes.

use crate::error::GatewayError;
use crate::gateway::results::{OperationOutcome, SendBody, SendResult};

pub const OK: u16 = 200;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;

/// The status/headers/body triple handed to the serving layer.
#[derive(Debug)]
pub struct GatewayResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: SendBody,
}

impl GatewayResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Render an outcome or failure as the final response.
pub fn build(result: Result<OperationOutcome, GatewayError>) -> GatewayResponse {
    match result {
        Ok(OperationOutcome::Sent(sent)) => send_response(sent),
        Ok(OperationOutcome::Done(message)) => success(message),
        Err(GatewayError::NotFound(path)) => not_found(&path),
        Err(GatewayError::Forbidden(message)) => forbidden(message),
        // The dispatcher folds these first; kept as a last resort so the
        // taxonomy stays two-shaped even for a future unfolded error.
        Err(GatewayError::Io(e)) => forbidden(e.to_string()),
    }
}

/// 200 with either a streamed or buffered file body.
fn send_response(sent: SendResult) -> GatewayResponse {
    let content_type = mime_guess::from_path(&sent.path)
        .first_raw()
        .unwrap_or("text/plain")
        .to_string();
    let last_modified = httpdate::fmt_http_date(sent.modified);
    let len = sent.body.len();

    GatewayResponse {
        status: OK,
        headers: vec![
            ("Last-Modified".to_string(), last_modified),
            ("Content-Type".to_string(), content_type),
            ("Content-Length".to_string(), len.to_string()),
        ],
        body: sent.body,
    }
}

/// 200 with a short message for a completed mutation.
fn success(message: String) -> GatewayResponse {
    GatewayResponse {
        status: OK,
        headers: vec![("Content-Type".to_string(), "text/html".to_string())],
        body: SendBody::Buffered(message.into_bytes()),
    }
}

fn not_found(path: &str) -> GatewayResponse {
    plain_text(NOT_FOUND, format!("Path not found: {}\n", path))
}

fn forbidden(message: String) -> GatewayResponse {
    let mut body = message;
    if !body.ends_with('\n') {
        body.push('\n');
    }
    plain_text(FORBIDDEN, body)
}

fn plain_text(status: u16, body: String) -> GatewayResponse {
    let bytes = body.into_bytes();
    GatewayResponse {
        status,
        headers: vec![
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("Content-Length".to_string(), bytes.len().to_string()),
        ],
        body: SendBody::Buffered(bytes),
    }
}

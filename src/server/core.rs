//! HTTP serving layer
//!
//! Thin axum adapter around the pipeline: extracts the raw path, the
//! `action` parameter, and any multipart upload, runs the dispatcher, and
//! transmits the resulting status/headers/body triple. All routing goes
//! through a single fallback handler, so every method and path reaches the
//! dispatcher.

use axum::Router;
use axum::body::Body;
use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use log::{error, info, warn};
use serde::Deserialize;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tokio_util::io::ReaderStream;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::results::SendBody;
use crate::gateway::{Dispatcher, GatewayRequest, UploadedPayload};
use crate::response::{self, GatewayResponse};

pub struct Server {
    config: GatewayConfig,
    dispatcher: Arc<Dispatcher>,
}

impl Server {
    /// Build the server, ensuring the configured root directory exists.
    pub fn new(config: GatewayConfig) -> Self {
        let root = config.root_path();

        if let Err(e) = std::fs::create_dir_all(&root) {
            warn!("Failed to create root directory {}: {}", root.display(), e);
        } else {
            info!("Gateway root directory: {}", root.display());
        }

        Self {
            dispatcher: Arc::new(Dispatcher::new(root)),
            config,
        }
    }

    /// The gateway router; exposed separately so tests can drive it without
    /// a socket.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(handle_request)
            .with_state(Arc::clone(&self.dispatcher))
    }

    pub async fn start(&self) -> std::io::Result<()> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("Gateway listening on {}", addr);
        axum::serve(listener, self.router()).await
    }
}

#[derive(Debug, Deserialize, Default)]
struct ActionQuery {
    action: Option<String>,
}

async fn handle_request(
    State(dispatcher): State<Arc<Dispatcher>>,
    Query(query): Query<ActionQuery>,
    request: Request,
) -> Response {
    let raw_path = request.uri().path().to_string();
    let mut action = query.action;
    let mut upload = None;

    if is_multipart(&request) {
        match read_form(request).await {
            Ok(form) => {
                // A form field wins over a query parameter, matching how
                // clients post `-F action=...`.
                if form.action.is_some() {
                    action = form.action;
                }
                upload = form.upload;
            }
            Err(message) => {
                warn!("Rejected malformed upload for {}: {}", raw_path, message);
                return transmit(response::build(Err(GatewayError::Forbidden(message))));
            }
        }
    }

    let outcome = dispatcher.dispatch(GatewayRequest {
        raw_path,
        action,
        upload,
    });
    transmit(response::build(outcome))
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

struct ParsedForm {
    action: Option<String>,
    upload: Option<UploadedPayload>,
}

/// Pull `action` and `file` out of a multipart body, spooling the file to a
/// temp file. Other fields are ignored.
async fn read_form(request: Request) -> Result<ParsedForm, String> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| e.to_string())?;

    let mut form = ParsedForm {
        action: None,
        upload: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("action") => {
                form.action = Some(field.text().await.map_err(|e| e.to_string())?);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                form.upload = Some(spool_field(filename, field).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn spool_field(filename: String, mut field: Field<'_>) -> Result<UploadedPayload, String> {
    let mut spooled = NamedTempFile::new().map_err(|e| e.to_string())?;

    while let Some(chunk) = field.chunk().await.map_err(|e| e.to_string())? {
        spooled.write_all(&chunk).map_err(|e| e.to_string())?;
    }
    spooled.flush().map_err(|e| e.to_string())?;

    Ok(UploadedPayload::new(filename, spooled))
}

/// Convert the gateway's transport-agnostic triple into an axum response,
/// streaming file bodies from disk.
fn transmit(gateway_response: GatewayResponse) -> Response {
    let body = match gateway_response.body {
        SendBody::Buffered(bytes) => Body::from(bytes),
        SendBody::Streamed { path, .. } => match std::fs::File::open(&path) {
            Ok(file) => Body::from_stream(ReaderStream::new(tokio::fs::File::from_std(file))),
            Err(e) => {
                // The file vanished between the guard and the transfer.
                error!("Failed to open {} for streaming: {}", path.display(), e);
                return transmit(response::build(Err(GatewayError::Forbidden(format!(
                    "Cannot send {} due to {}",
                    path.display(),
                    e
                )))));
            }
        },
    };

    let status = StatusCode::from_u16(gateway_response.status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (name, value) in &gateway_response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    match builder.body(body) {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to assemble response: {}", e);
            let mut fallback = Response::new(Body::from("Cannot assemble response\n"));
            *fallback.status_mut() = StatusCode::FORBIDDEN;
            fallback
        }
    }
}

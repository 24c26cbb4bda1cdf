//! Request-to-filesystem pipeline
//!
//! Sanitization, access guards, filesystem primitives, and per-action
//! dispatch. Everything here is synchronous and request-scoped; request
//! concurrency belongs to the serving layer.

pub mod action;
pub mod dispatcher;
pub mod executor;
pub mod guard;
pub mod permissions;
pub mod results;
pub mod sanitize;
pub mod upload;

pub use action::Action;
pub use dispatcher::{Dispatcher, GatewayRequest};
pub use results::{OperationOutcome, SendBody, SendResult};
pub use sanitize::SanitizedPath;
pub use upload::UploadedPayload;

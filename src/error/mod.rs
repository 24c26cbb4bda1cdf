//! Error handling
//!
//! Failure taxonomy shared by every pipeline stage.

pub mod types;

pub use types::GatewayError;

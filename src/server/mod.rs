//! HTTP serving layer
//!
//! Socket handling and request parsing around the core pipeline.

pub mod core;

pub use core::Server;

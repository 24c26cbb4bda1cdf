//! Response assembly
//!
//! Turns pipeline outcomes into the transport-agnostic response triple.

pub mod builder;

pub use builder::{GatewayResponse, build};

pub mod config;
pub mod error;
pub mod gateway;
pub mod response;
pub mod server;

pub use server::Server;

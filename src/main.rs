//! File Gateway - Entry Point
//!
//! An HTTP gateway exposing a sandboxed filesystem subtree for read and
//! write operations.

use log::{error, info};

use file_gateway::Server;
use file_gateway::config::GatewayConfig;

#[tokio::main]
async fn main() {
    // env_logger picks up the RUST_LOG environment variable
    env_logger::init();

    let config = match GatewayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Launching file gateway...");

    let server = Server::new(config);
    if let Err(e) = server.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

//! Room-based chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomrelay-server -- --port 3000
//! ```

use clap::Parser;
use roomrelay_server::config::ServerConfig;
use roomrelay_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = roomrelay_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

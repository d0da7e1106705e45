//! Chime time broadcast server.
//!
//! Accepts WebSocket connections, welcomes each client with an identity and
//! a secret number, and broadcasts the current time to all of them on an
//! interval.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chime-server
//! ```

use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use chime_server::{ServerConfig, ui::signal};
use chime_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "chime-server", about = "Time broadcast WebSocket server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(long, default_value_t = 5005)]
    port: u16,

    /// Seconds between time broadcasts
    #[arg(long, default_value_t = 10)]
    broadcast_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        broadcast_interval: Duration::from_secs(args.broadcast_interval_secs),
    };

    // One token reaches every loop: accept, broadcast timer, handlers
    let shutdown = CancellationToken::new();
    tokio::spawn(signal::shutdown_on_ctrl_c(shutdown.clone()));

    // Run the server; a bind failure is the only fatal error
    if let Err(e) = chime_server::run(config, shutdown).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

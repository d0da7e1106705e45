//! Chime echo client.
//!
//! Connects to the time broadcast server and echoes the assigned secret
//! whenever prompted.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chime-client
//! ```

use clap::Parser;
use tokio_util::sync::CancellationToken;

use chime_client::run_client;
use chime_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "chime-client", about = "Echo client for the time broadcast server")]
struct Args {
    /// WebSocket endpoint of the server
    #[arg(long, default_value = "ws://127.0.0.1:5005/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping client");
            watcher.cancel();
        }
    });

    match run_client(&args.url, cancel).await {
        Ok(state) => tracing::info!("Client stopped ({:?})", state),
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    }
}

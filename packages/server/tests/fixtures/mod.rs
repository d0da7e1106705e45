//! Shared fixtures for integration tests.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use chime_server::{ServerConfig, run};

/// A server instance running on a background task for the duration of a
/// test. Each test uses its own port.
pub struct TestServer {
    port: u16,
    shutdown: CancellationToken,
}

impl TestServer {
    /// Start a server on `port` and wait until it accepts TCP connections.
    pub async fn start(port: u16, broadcast_interval: Duration) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            broadcast_interval,
        };
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = run(config, token).await {
                panic!("Test server failed: {e}");
            }
        });

        // Wait for the listener to come up
        for _ in 0..100 {
            if tokio::net::TcpStream::connect(("127.0.0.1", port))
                .await
                .is_ok()
            {
                return Self { port, shutdown };
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Test server did not start on port {port}");
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

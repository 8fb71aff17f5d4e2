//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use offline_origin::config::GatewayConfig;
use offline_origin::http::HttpServer;
use offline_origin::lifecycle::Shutdown;
use offline_origin::store::AssetStore;

/// Start a mock upstream that answers every request with a fixed response.
/// Returns the address it listens on.
pub async fn start_upstream(
    status_line: &'static str,
    headers: &'static [(&'static str, &'static str)],
    body: &'static str,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Drain the request before answering so the client
                        // never sees a reset mid-send.
                        let mut buf = [0u8; 65536];
                        let _ = socket.read(&mut buf).await;

                        let mut response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                            status_line,
                            body.len()
                        );
                        for (name, value) in headers {
                            response.push_str(&format!("{}: {}\r\n", name, value));
                        }
                        response.push_str("\r\n");
                        response.push_str(body);

                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Gateway config pointed at the given upstream, everything else default.
pub fn gateway_config(upstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.origin = format!("http://{upstream}");
    config.observability.metrics_enabled = false;
    config
}

/// Spawn a gateway over `store`, bound to an ephemeral port.
pub async fn spawn_gateway(
    config: GatewayConfig,
    store: Arc<dyn AssetStore>,
) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config, store);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}

/// Non-pooling client, one connection per request.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn dead_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

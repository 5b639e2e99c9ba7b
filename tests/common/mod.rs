//! Shared utilities for integration testing.

use std::net::SocketAddr;

use admin_gateway::config::{GatewayConfig, RouteConfig};
use admin_gateway::routing::ControllerRegistry;
use admin_gateway::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// A gateway serving on an ephemeral local port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a gateway with the given routes and controllers.
pub async fn start_gateway(routes: Vec<RouteConfig>, registry: ControllerRegistry) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.routes = routes;

    let server = HttpServer::new(&config, registry).expect("routes should compile");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestGateway { addr, shutdown }
}

/// HTTP client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

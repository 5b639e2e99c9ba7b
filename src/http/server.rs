//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener
//! - Dispatch unmatched requests to the route dispatcher

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::invoice::{parse_invoice, validate_invoices};
use crate::http::request::{request_span, MakeRequestUuidV4};
use crate::http::response::ApiResponse;
use crate::routing::{ActionRefError, ControllerRegistry, Router as Dispatcher};

/// Paths served by Axum routes ahead of the dispatcher.
pub const VALIDATE_INVOICES_PATH: &str = "/api/invoices/validate";
pub const PARSE_INVOICE_PATH: &str = "/api/invoices/parse";
pub const LIST_ROUTES_PATH: &str = "/admin/routes";

/// `(method, path)` pairs the dispatcher never sees. `get` routes also answer `HEAD`.
pub const BUILTIN_ENDPOINTS: &[(&str, &str)] = &[
    ("POST", VALIDATE_INVOICES_PATH),
    ("GET", PARSE_INVOICE_PATH),
    ("HEAD", PARSE_INVOICE_PATH),
    ("GET", LIST_ROUTES_PATH),
    ("HEAD", LIST_ROUTES_PATH),
];

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the admin gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    /// The dispatcher is compiled from `config.routes` and frozen here.
    pub fn new(config: &GatewayConfig, registry: ControllerRegistry) -> Result<Self, ActionRefError> {
        let dispatcher = Arc::new(Dispatcher::from_config(&config.routes, registry)?);

        for action in dispatcher.unregistered_actions() {
            tracing::warn!(handler = %action, "Route names a controller that is not registered");
        }
        tracing::info!(routes = dispatcher.routes().len(), "Route table compiled");

        let state = AppState { dispatcher };
        let router = Self::build_router(config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    /// Requests for a built-in path with another method still reach the dispatcher.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route(VALIDATE_INVOICES_PATH, post(validate_invoices))
            .route(PARSE_INVOICE_PATH, get(parse_invoice))
            .route(LIST_ROUTES_PATH, get(list_routes))
            .fallback(dispatch_handler)
            .method_not_allowed_fallback(dispatch_handler)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The assembled Axum router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback: everything not served by an Axum route goes through the dispatcher.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    state.dispatcher.dispatch(method.as_str(), uri.path())
}

async fn list_routes(State(state): State<AppState>) -> Response {
    ApiResponse::ok(state.dispatcher.summaries()).into_response()
}

/// Wait for the coordinator's broadcast or Ctrl+C.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    // A dropped coordinator is not a shutdown request.
    let coordinator = async {
        if let Err(broadcast::error::RecvError::Closed) = shutdown.recv().await {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = coordinator => {},
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;
    use crate::controllers::builtin_registry;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn server(routes: Vec<RouteConfig>) -> HttpServer {
        let mut config = GatewayConfig::default();
        config.routes = routes;
        HttpServer::new(&config, builtin_registry()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_request_id_is_set_on_response() {
        let app = server(vec![]).router();
        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let app = server(vec![]).router();
        let response = app
            .oneshot(
                Request::get("/nope")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
    }

    #[tokio::test]
    async fn test_fallback_dispatches_configured_route() {
        let app = server(vec![RouteConfig::new(
            "GET",
            "/admin/dashboard.php",
            "SystemController@status",
        )])
        .router();

        let response = app
            .oneshot(Request::get("/admin/dashboard.php").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "operational");
    }

    #[tokio::test]
    async fn test_missing_controller_yields_500_envelope() {
        let app = server(vec![RouteConfig::new("GET", "/users", "UserController@index")]).router();

        let response = app
            .oneshot(Request::get("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({
                "success": false,
                "message": "Controller not found: UserController"
            })
        );
    }

    #[tokio::test]
    async fn test_list_routes() {
        let app = server(vec![RouteConfig::new("get", "/health", "SystemController@health")]).router();

        let response = app
            .oneshot(Request::get("/admin/routes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            json_body(response).await["data"],
            serde_json::json!([
                { "method": "GET", "path": "/health", "handler": "SystemController@health" }
            ])
        );
    }
}

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::response::ApiResponse;
use crate::routing::Controller;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// Runtime status and liveness.
#[derive(Debug, Default)]
pub struct SystemController;

impl SystemController {
    pub fn status(&self) -> Response {
        ApiResponse::ok(SystemStatus {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            status: "operational",
        })
        .into_response()
    }

    pub fn health(&self) -> Response {
        ApiResponse::ok("ok").into_response()
    }
}

impl Controller for SystemController {
    fn actions(&self) -> &'static [&'static str] {
        &["status", "health"]
    }

    fn call(&self, action: &str) -> Option<Response> {
        match action {
            "status" => Some(self.status()),
            "health" => Some(self.health()),
            _ => None,
        }
    }
}

//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Look up the first route matching `(method, path)`
//! - Invoke its handler, or shape a 404/500 error response
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) linear scan (acceptable for small static route tables)
//! - First match wins; duplicates are accepted and logged
//! - Resolution failures never escape `dispatch`

use std::fmt;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::config::RouteConfig;
use crate::observability::metrics;
use crate::routing::error::DispatchError;
use crate::routing::matcher::RouteKey;
use crate::routing::registry::{ActionRef, ActionRefError, ControllerRegistry};

/// Inline handler invoked with no arguments.
pub type Callback = Arc<dyn Fn() -> Response + Send + Sync>;

/// What a route runs when it matches.
#[derive(Clone)]
pub enum Handler {
    Callback(Callback),
    Action(ActionRef),
}

impl Handler {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn() -> Response + Send + Sync + 'static,
    {
        Handler::Callback(Arc::new(f))
    }

    pub fn action(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Handler::Action(ActionRef::new(controller, action))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Callback(_) => f.write_str("Callback"),
            Handler::Action(action) => write!(f, "Action({})", action),
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Callback(_) => f.write_str("<callback>"),
            Handler::Action(action) => fmt::Display::fmt(action, f),
        }
    }
}

/// A registered endpoint.
#[derive(Debug, Clone)]
pub struct Route {
    pub key: RouteKey,
    pub handler: Handler,
}

/// Serializable view of a route, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub method: String,
    pub path: String,
    pub handler: String,
}

/// Ordered route table plus the registry used to resolve controller actions.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
    registry: ControllerRegistry,
}

impl Router {
    pub fn new(registry: ControllerRegistry) -> Self {
        Self {
            routes: Vec::new(),
            registry,
        }
    }

    /// Build a router from configured routes, preserving file order.
    pub fn from_config(
        routes: &[RouteConfig],
        registry: ControllerRegistry,
    ) -> Result<Self, ActionRefError> {
        let mut router = Self::new(registry);
        for route in routes {
            let action: ActionRef = route.handler.parse()?;
            router.register(&route.method, route.path.clone(), Handler::Action(action));
        }
        Ok(router)
    }

    /// Append a route. A later duplicate of an existing `(method, path)` is
    /// kept but can never be selected.
    pub fn register(
        &mut self,
        method: impl AsRef<str>,
        path: impl Into<String>,
        handler: Handler,
    ) -> &mut Self {
        let key = RouteKey::new(method, path);
        if self.routes.iter().any(|r| r.key == key) {
            tracing::warn!(route = %key, "Duplicate route registered; earlier registration wins");
        } else {
            tracing::debug!(route = %key, handler = %handler, "Route registered");
        }
        self.routes.push(Route { key, handler });
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.routes
            .iter()
            .map(|r| RouteSummary {
                method: r.key.method().to_string(),
                path: r.key.path().to_string(),
                handler: r.handler.to_string(),
            })
            .collect()
    }

    /// Action routes whose controller has no registry entry. Dispatching
    /// them always fails with "controller not found".
    pub fn unregistered_actions(&self) -> Vec<&ActionRef> {
        self.routes
            .iter()
            .filter_map(|r| match &r.handler {
                Handler::Action(action) if !self.registry.contains(&action.controller) => {
                    Some(action)
                }
                _ => None,
            })
            .collect()
    }

    /// Find the first route registered under `(method, path)`.
    pub fn match_route(&self, method: &str, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.key.matches(method, path))
    }

    /// Match and invoke, reporting failures as typed errors.
    pub fn try_dispatch(&self, method: &str, path: &str) -> Result<Response, DispatchError> {
        let route = self
            .match_route(method, path)
            .ok_or_else(|| DispatchError::NotFound {
                path: path.to_string(),
            })?;

        match &route.handler {
            Handler::Callback(callback) => Ok(callback()),
            Handler::Action(action) => Ok(self
                .registry
                .resolve(&action.controller, &action.action)?),
        }
    }

    /// Match and invoke. Failures become structured JSON error responses.
    pub fn dispatch(&self, method: &str, path: &str) -> Response {
        match self.try_dispatch(method, path) {
            Ok(response) => {
                metrics::record_dispatch("handled");
                response
            }
            Err(err @ DispatchError::NotFound { .. }) => {
                tracing::warn!(method = %method, path = %path, "No route matched");
                metrics::record_dispatch("not_found");
                err.into_response()
            }
            Err(err @ DispatchError::Resolution(_)) => {
                tracing::error!(method = %method, path = %path, error = %err, "Handler resolution failed");
                metrics::record_dispatch("resolution_error");
                err.into_response()
            }
        }
    }
}

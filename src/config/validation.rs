//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route handler is a well-formed `Controller@action` reference
//! - Validate value ranges (timeouts > 0)
//! - Detect conflicting routes, including ones shadowed by built-in endpoints
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Whether a controller is actually registered is checked at dispatch time

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::http::server::BUILTIN_ENDPOINTS;
use crate::routing::ActionRef;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Route method is empty or contains non-alphabetic characters.
    #[error("routes[{index}]: invalid method '{method}'")]
    InvalidMethod { index: usize, method: String },

    /// Route path does not start with `/`.
    #[error("routes[{index}]: path '{path}' must start with '/'")]
    InvalidPath { index: usize, path: String },

    /// Route handler is not a `Controller@action` reference.
    #[error("routes[{index}]: handler '{handler}' is not of the form Controller@action")]
    InvalidHandler { index: usize, handler: String },

    /// Same `(method, path)` registered twice.
    #[error("routes[{index}]: duplicate route {method} {path}")]
    DuplicateRoute { index: usize, method: String, path: String },

    /// Route is shadowed by an endpoint the gateway serves itself.
    #[error("routes[{index}]: {method} {path} is served by a built-in endpoint")]
    ReservedRoute { index: usize, method: String, path: String },

    /// Request timeout must be greater than zero.
    #[error("timeouts.request_secs must be > 0")]
    ZeroTimeout,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        let method = route.method.to_ascii_uppercase();
        if method.is_empty() || !method.bytes().all(|b| b.is_ascii_alphabetic()) {
            errors.push(ValidationError::InvalidMethod {
                index,
                method: route.method.clone(),
            });
        }

        if !route.path.starts_with('/') {
            errors.push(ValidationError::InvalidPath {
                index,
                path: route.path.clone(),
            });
        }

        if route.handler.parse::<ActionRef>().is_err() {
            errors.push(ValidationError::InvalidHandler {
                index,
                handler: route.handler.clone(),
            });
        }

        if BUILTIN_ENDPOINTS
            .iter()
            .any(|(m, p)| *m == method && *p == route.path)
        {
            errors.push(ValidationError::ReservedRoute {
                index,
                method: method.clone(),
                path: route.path.clone(),
            });
        }

        if !seen.insert((method.clone(), route.path.clone())) {
            errors.push(ValidationError::DuplicateRoute {
                index,
                method,
                path: route.path.clone(),
            });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Dispatch error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::ApiResponse;

/// Failure to locate or invoke the handler of a matched route.
///
/// These are configuration defects, never user input errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No loadable unit is registered under this name.
    #[error("Controller not found: {0}")]
    ControllerNotFound(String),

    /// The unit exists but does not define the controller type.
    #[error("Controller class not found: {0}")]
    ClassNotFound(String),

    /// The controller does not expose the requested action.
    #[error("Method not found: {controller}@{action}")]
    MethodNotFound { controller: String, action: String },
}

/// Everything that can stop a request from reaching a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Route not found: {path}")]
    NotFound { path: String },

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::NotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::Resolution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::error(self.to_string()).with_status(self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let not_found = DispatchError::NotFound { path: "/nope".into() };
        assert_eq!(not_found.to_string(), "Route not found: /nope");
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let missing: DispatchError = ResolutionError::MethodNotFound {
            controller: "UserController".into(),
            action: "delete".into(),
        }
        .into();
        assert_eq!(missing.to_string(), "Method not found: UserController@delete");
        assert_eq!(missing.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Route matching logic.
//!
//! # Responsibilities
//! - Normalize the HTTP method to uppercase
//! - Match the request path exactly (case-sensitive)
//! - Combine both conditions with AND semantics
//!
//! # Design Decisions
//! - Method matching is case-insensitive (normalized at both ends)
//! - Path matching is exact: no prefixes, parameters or trailing-slash folding
//! - No regex to guarantee O(n) matching

use std::fmt;

/// The `(method, path)` pair a route is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    method: String,
    path: String,
}

impl RouteKey {
    /// Create a new key.
    /// The method is normalized to uppercase; the path is kept verbatim.
    pub fn new(method: impl AsRef<str>, path: impl Into<String>) -> Self {
        Self {
            method: method.as_ref().to_ascii_uppercase(),
            path: path.into(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if the request's method and path select this key.
    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.method.eq_ignore_ascii_case(method) && self.path == path
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

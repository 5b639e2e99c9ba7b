//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (exact method + path comparison)
//!     → registry.rs (resolve Controller@action, construct, invoke)
//!     → Return: handler response, or 404/500 JSON error
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Parse Controller@action references
//!     → Append in file order
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex or path parameters (exact matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod error;
pub mod matcher;
pub mod registry;
pub mod router;

pub use error::{DispatchError, ResolutionError};
pub use matcher::RouteKey;
pub use registry::{ActionRef, ActionRefError, Controller, ControllerFactory, ControllerRegistry};
pub use router::{Callback, Handler, Route, RouteSummary, Router};

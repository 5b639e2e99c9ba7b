//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → invoice.rs (invoice filename endpoints)
//!       or routing::Router::dispatch (everything else)
//!     → response.rs (JSON envelope)
//!     → Send to client
//! ```

pub mod invoice;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ApiResponse;
pub use server::{AppState, HttpServer};

//! Admin Gateway Library
//!
//! Front controller for the admin panel and mobile-app backend, plus the
//! invoice filename parser.

pub mod config;
pub mod controllers;
pub mod http;
pub mod invoice;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::Router;

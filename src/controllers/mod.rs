//! Built-in controllers.
//!
//! Controllers are registered by name so routes can reference them as
//! `Controller@action` from the config file.

pub mod system;

use crate::config::RouteConfig;
use crate::routing::{Controller, ControllerRegistry};

pub use system::SystemController;

/// Registry holding every controller shipped with the gateway.
pub fn builtin_registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry.register("SystemController", || {
        Box::new(SystemController) as Box<dyn Controller>
    });
    registry
}

/// Routes used when the config file defines none.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("GET", "/admin/status", "SystemController@status"),
        RouteConfig::new("GET", "/health", "SystemController@health"),
    ]
}

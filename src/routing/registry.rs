//! Controller registry and handler resolution.
//!
//! # Responsibilities
//! - Map controller names to zero-argument constructors
//! - Parse `Controller@action` handler references
//! - Instantiate a fresh controller per invocation and call the action
//!
//! # Design Decisions
//! - Populated once at startup, read-only afterwards
//! - A unit may be declared without a controller type; resolving it
//!   reports a missing class rather than a missing controller
//! - No reflection: unregistered names fail with a `ResolutionError`

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use axum::response::Response;
use thiserror::Error;

use crate::routing::error::ResolutionError;

/// A named group of zero-argument actions.
pub trait Controller: Send {
    /// Names of the actions this controller exposes.
    fn actions(&self) -> &'static [&'static str];

    /// Invoke `action`. Returns `None` if the action is not exposed.
    fn call(&self, action: &str) -> Option<Response>;
}

/// Zero-argument constructor for a controller.
pub type ControllerFactory = fn() -> Box<dyn Controller>;

/// A loadable unit. `factory` is `None` when the unit does not define the
/// controller type it is named after.
#[derive(Clone, Copy)]
struct ControllerUnit {
    factory: Option<ControllerFactory>,
}

#[derive(Clone, Default)]
pub struct ControllerRegistry {
    units: HashMap<String, ControllerUnit>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit `name` defining a controller of the same name.
    pub fn register(&mut self, name: impl Into<String>, factory: ControllerFactory) -> &mut Self {
        self.units.insert(
            name.into(),
            ControllerUnit {
                factory: Some(factory),
            },
        );
        self
    }

    /// Declare a unit `name` that defines no controller type.
    pub fn declare(&mut self, name: impl Into<String>) -> &mut Self {
        self.units
            .entry(name.into())
            .or_insert(ControllerUnit { factory: None });
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Resolve `controller`, construct it, and invoke `action` on the new instance.
    pub fn resolve(&self, controller: &str, action: &str) -> Result<Response, ResolutionError> {
        let unit = self
            .units
            .get(controller)
            .ok_or_else(|| ResolutionError::ControllerNotFound(controller.to_string()))?;

        let factory = unit
            .factory
            .ok_or_else(|| ResolutionError::ClassNotFound(controller.to_string()))?;

        let method_not_found = || ResolutionError::MethodNotFound {
            controller: controller.to_string(),
            action: action.to_string(),
        };

        let instance = factory();
        if !instance.actions().contains(&action) {
            return Err(method_not_found());
        }
        instance.call(action).ok_or_else(method_not_found)
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.units.keys().collect();
        names.sort();
        f.debug_struct("ControllerRegistry")
            .field("units", &names)
            .finish()
    }
}

/// A `(controller, action)` pair referenced by a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionRef {
    pub controller: String,
    pub action: String,
}

impl ActionRef {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid handler reference '{0}', expected Controller@action")]
pub struct ActionRefError(pub String);

impl FromStr for ActionRef {
    type Err = ActionRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((controller, action))
                if !controller.is_empty() && !action.is_empty() && !action.contains('@') =>
            {
                Ok(Self::new(controller, action))
            }
            _ => Err(ActionRefError(s.to_string())),
        }
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.controller, self.action)
    }
}

//! Error types for route registry bootstrap and URL resolution.
//!
//! Bootstrap failures ([`SpecParseError`], [`RegistryError`]) are fatal to the
//! client being built. Per-call failures ([`RouteNotFoundError`],
//! [`BindingError`]) are recoverable by the caller and always name the
//! offending route or parameter.

use crate::spec::ParamType;
use thiserror::Error;

/// The API description could not be read as a Swagger/OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SpecParseError {
    #[error("description is neither valid JSON nor valid YAML: {message}")]
    Syntax { message: String },

    #[error("invalid structure at {location}: {message}")]
    InvalidStructure { location: String, message: String },

    #[error("description has no `paths` section")]
    MissingPaths,

    #[error("operation declared under an empty or relative path `{path}`")]
    MissingPath { path: String },

    #[error("operation under `{path}` has no recognizable HTTP method (key `{key}`)")]
    MissingMethod { path: String, key: String },

    #[error("parameter at {location} has no name")]
    MissingParamName { location: String },

    #[error("parameter `{name}` at {location} has no `in` location")]
    MissingParamLocation { location: String, name: String },

    #[error("parameter `{name}` at {location} has unknown location `{found}`")]
    UnknownParamLocation {
        location: String,
        name: String,
        found: String,
    },

    #[error("unresolvable reference `{reference}` at {location}")]
    UnresolvedRef { location: String, reference: String },

    #[error("operation {method} {path} is declared more than once")]
    DuplicateOperation { method: String, path: String },
}

impl SpecParseError {
    pub(crate) fn invalid(location: impl Into<String>, message: impl Into<String>) -> Self {
        SpecParseError::InvalidStructure {
            location: location.into(),
            message: message.into(),
        }
    }
}

/// The description parsed but its operations do not form a consistent registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("route name `{name}` is produced by both {first} and {second}")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    #[error("route `{route}`: placeholder `{{{placeholder}}}` has no path parameter")]
    UnboundPlaceholder { route: String, placeholder: String },

    #[error("route `{route}`: path parameter `{param}` has no placeholder in the template")]
    OrphanPathParam { route: String, param: String },

    #[error("route `{route}`: placeholder `{{{placeholder}}}` appears more than once")]
    DuplicatePlaceholder { route: String, placeholder: String },

    #[error("route `{route}`: malformed path template `{template}`")]
    MalformedTemplate { route: String, template: String },
}

/// No route is registered under the requested name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route named `{name}`")]
pub struct RouteNotFoundError {
    pub name: String,
}

/// The supplied parameters do not satisfy the route's declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BindingError {
    #[error("missing required parameter `{name}`")]
    MissingRequired { name: String },

    #[error("parameter `{name}` expects {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: ParamType,
        found: String,
    },

    #[error("parameter `{name}` is not declared on this route")]
    UnknownParameter { name: String },

    #[error("path parameter `{name}` is empty")]
    EmptyPathValue { name: String },
}

impl BindingError {
    /// Name of the offending parameter.
    #[must_use]
    pub fn param_name(&self) -> &str {
        match self {
            BindingError::MissingRequired { name }
            | BindingError::TypeMismatch { name, .. }
            | BindingError::UnknownParameter { name }
            | BindingError::EmptyPathValue { name } => name,
        }
    }
}

/// Failure while building a client from a description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BootstrapError {
    #[error(transparent)]
    Spec(#[from] SpecParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Failure while resolving a route name and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error(transparent)]
    RouteNotFound(#[from] RouteNotFoundError),

    #[error("route `{route}`: {source}")]
    Binding {
        route: String,
        #[source]
        source: BindingError,
    },
}

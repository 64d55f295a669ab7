//! # Client
//!
//! [`Client`] is the one construction shape consumers use: it owns a
//! [`RouteRegistry`] built from an API description and resolves route names to
//! URLs or full request descriptors.
//!
//! ```
//! use martian::{Client, ClientOptions, Params};
//!
//! let description = r#"{
//!   "swagger": "2.0",
//!   "paths": {
//!     "/users/{id}": {
//!       "get": {
//!         "operationId": "getUser",
//!         "parameters": [
//!           { "name": "id", "in": "path", "required": true, "type": "integer" }
//!         ]
//!       }
//!     }
//!   }
//! }"#;
//!
//! let client = Client::new("https://api.example.com", description, ClientOptions::default())?;
//! let url = client.url_for_with("get-user", &Params::new().with("id", 42))?;
//! assert_eq!(url, "https://api.example.com/users/42");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::binder::{bind, Params};
use crate::config::ClientOptions;
use crate::error::{BootstrapError, RegistryError, ResolveError, RouteNotFoundError};
use crate::registry::{RouteDefinition, RouteRegistry};
use crate::resolver::resolve;
use crate::spec::{self, normalize_base_path, ApiDescription};
use http::Method;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Everything needed to issue a request, short of sending it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub url: String,
    /// Header parameters, plus a `Cookie` header when cookie parameters are bound.
    pub headers: Vec<(String, String)>,
    /// Swagger 2 `formData` fields.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

/// Name and summary of a route, as listed by [`Client::explore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub name: String,
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
    pub summary: Option<String>,
}

/// A route registry bound to an API root.
///
/// Cloning is cheap: the registry is shared behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct Client {
    /// Root as supplied by the caller.
    api_root: String,
    /// `api_root` joined with the base path in effect.
    effective_root: String,
    registry: Arc<RouteRegistry>,
    options: ClientOptions,
}

impl Client {
    /// Build a client from description text (JSON or YAML).
    ///
    /// # Errors
    ///
    /// [`BootstrapError::Spec`] when the text is not a usable description,
    /// [`BootstrapError::Registry`] when its operations are inconsistent.
    pub fn new(
        api_root: impl Into<String>,
        raw_description: &str,
        options: ClientOptions,
    ) -> Result<Self, BootstrapError> {
        let description = spec::load(raw_description)?;
        Ok(Self::from_description(api_root, description, options)?)
    }

    /// Build a client from an already parsed document.
    pub fn from_value(
        api_root: impl Into<String>,
        document: &Value,
        options: ClientOptions,
    ) -> Result<Self, BootstrapError> {
        let description = spec::load_value(document)?;
        Ok(Self::from_description(api_root, description, options)?)
    }

    /// Read a description file and build a client from it.
    pub fn from_path(
        api_root: impl Into<String>,
        path: impl AsRef<Path>,
        options: ClientOptions,
    ) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read API description {}", path.display()))?;
        Self::new(api_root, &raw, options)
            .with_context(|| format!("failed to load API description {}", path.display()))
    }

    /// Build a client from a loaded description.
    pub fn from_description(
        api_root: impl Into<String>,
        description: ApiDescription,
        options: ClientOptions,
    ) -> Result<Self, RegistryError> {
        let api_root = api_root.into();
        let registry = RouteRegistry::build(description, options.placeholder_matching)?;

        let base_path = match &options.base_path {
            Some(over) => normalize_base_path(over),
            None => registry.base_path().to_string(),
        };
        let effective_root = format!("{}{}", api_root.trim_end_matches('/'), base_path);

        Ok(Self {
            api_root,
            effective_root,
            registry: Arc::new(registry),
            options,
        })
    }

    /// Root as passed to the constructor.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Root every URL starts with: the API root plus the base path in effect.
    #[must_use]
    pub fn effective_root(&self) -> &str {
        &self.effective_root
    }

    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    #[must_use]
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Definition of a route.
    pub fn route(&self, name: &str) -> Result<&RouteDefinition, RouteNotFoundError> {
        self.registry.lookup(name).map(Arc::as_ref)
    }

    /// Every route with its summary, in document order.
    #[must_use]
    pub fn explore(&self) -> Vec<RouteSummary> {
        self.registry
            .routes()
            .map(|r| RouteSummary {
                name: r.name.clone(),
                method: r.method.clone(),
                path: r.path_template.as_str().to_string(),
                summary: r.summary.clone(),
            })
            .collect()
    }

    /// URL of a route that needs no parameters.
    ///
    /// # Errors
    ///
    /// [`ResolveError::RouteNotFound`] for an unknown name and
    /// [`ResolveError::Binding`] when the route has required parameters
    /// without defaults.
    pub fn url_for(&self, route_name: &str) -> Result<String, ResolveError> {
        self.url_for_with(route_name, &Params::new())
    }

    /// URL of a route with parameters.
    pub fn url_for_with(&self, route_name: &str, params: &Params) -> Result<String, ResolveError> {
        let route = self.registry.lookup(route_name)?;
        let bound = bind(route, params, self.options.unknown_params).map_err(|source| {
            ResolveError::Binding {
                route: route.name.clone(),
                source,
            }
        })?;
        let url = resolve(&self.effective_root, route, &bound);
        debug!(route = %route.name, url = %url, "Resolved URL");
        Ok(url)
    }

    /// Full request descriptor for a route.
    pub fn request_for(
        &self,
        route_name: &str,
        params: &Params,
    ) -> Result<RequestDescriptor, ResolveError> {
        let route = self.registry.lookup(route_name)?;
        let bound = bind(route, params, self.options.unknown_params).map_err(|source| {
            ResolveError::Binding {
                route: route.name.clone(),
                source,
            }
        })?;
        let url = resolve(&self.effective_root, route, &bound);

        let mut headers: Vec<(String, String)> = bound.headers.into_iter().collect();
        if !bound.cookies.is_empty() {
            let cookie = bound
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            headers.push(("Cookie".to_string(), cookie));
        }

        debug!(route = %route.name, method = %route.method, url = %url, "Built request");
        Ok(RequestDescriptor {
            method: route.method.clone(),
            url,
            headers,
            form: bound.form.into_iter().collect(),
            body: bound.body,
        })
    }
}

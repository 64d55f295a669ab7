use super::naming::route_name;
use super::template::PathTemplate;
use crate::config::PlaceholderMatching;
use crate::error::{RegistryError, RouteNotFoundError};
use crate::spec::{ApiDescription, Operation, ParameterDeclaration, ParameterLocation};
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A named, validated operation ready for binding and resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDefinition {
    /// Unique symbolic name (see [`naming`](super::naming)).
    pub name: String,
    pub method: Method,
    pub path_template: PathTemplate,
    /// Declarations in document order, path-level first.
    pub parameters: Vec<ParameterDeclaration>,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl RouteDefinition {
    /// Look up a declaration by name, whatever its location.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterDeclaration> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Declarations travelling in the path.
    pub fn path_parameters(&self) -> impl Iterator<Item = &ParameterDeclaration> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Path)
    }

    /// `METHOD /template`, used in logs and error messages.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{} {}", self.method, self.path_template)
    }
}

/// Route name to definition mapping, immutable once built.
///
/// Lookups take `&self` only, so one registry can serve any number of threads
/// without locking.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: HashMap<String, Arc<RouteDefinition>>,
    /// Definitions in document order.
    ordered: Vec<Arc<RouteDefinition>>,
    base_path: String,
}

impl RouteRegistry {
    /// Validate every operation of `description` and index it by name.
    ///
    /// # Errors
    ///
    /// Fails with [`RegistryError::DuplicateName`] when two operations resolve
    /// to the same name, and with the placeholder variants when a path
    /// template and its PATH declarations disagree.
    pub fn build(
        description: ApiDescription,
        matching: PlaceholderMatching,
    ) -> Result<Self, RegistryError> {
        let ApiDescription {
            base_path,
            operations,
        } = description;

        let mut routes: HashMap<String, Arc<RouteDefinition>> =
            HashMap::with_capacity(operations.len());
        let mut ordered = Vec::with_capacity(operations.len());

        for operation in operations {
            let route = Arc::new(build_route(operation, matching)?);

            if let Some(existing) = routes.get(&route.name) {
                return Err(RegistryError::DuplicateName {
                    name: route.name.clone(),
                    first: existing.signature(),
                    second: route.signature(),
                });
            }

            debug!(
                route = %route.name,
                method = %route.method,
                path = %route.path_template,
                params = route.parameters.len(),
                "Registered route"
            );
            routes.insert(route.name.clone(), Arc::clone(&route));
            ordered.push(route);
        }

        let routes_summary: Vec<String> = ordered
            .iter()
            .take(10)
            .map(|r| format!("{} -> {}", r.signature(), r.name))
            .collect();
        info!(
            routes_count = ordered.len(),
            base_path = %base_path,
            routes_summary = ?routes_summary,
            "Route registry built"
        );

        Ok(Self {
            routes,
            ordered,
            base_path,
        })
    }

    /// Find a route by name.
    ///
    /// # Errors
    ///
    /// Returns [`RouteNotFoundError`] for an unknown name.
    pub fn lookup(&self, name: &str) -> Result<&Arc<RouteDefinition>, RouteNotFoundError> {
        self.routes.get(name).ok_or_else(|| RouteNotFoundError {
            name: name.to_string(),
        })
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<RouteDefinition>> {
        self.routes.get(name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Every route in document order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<RouteDefinition>> {
        self.ordered.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Base path declared by the description (empty when none).
    #[inline]
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

fn build_route(
    operation: Operation,
    matching: PlaceholderMatching,
) -> Result<RouteDefinition, RegistryError> {
    let Operation {
        operation_id,
        method,
        path,
        summary,
        description,
        tags,
        parameters,
    } = operation;

    let name = route_name(operation_id.as_deref(), &method, &path);
    let mut template =
        PathTemplate::parse(&path).ok_or_else(|| RegistryError::MalformedTemplate {
            route: name.clone(),
            template: path.clone(),
        })?;

    let placeholders: Vec<String> = template.placeholders().map(str::to_string).collect();
    for (idx, placeholder) in placeholders.iter().enumerate() {
        if placeholders[..idx]
            .iter()
            .any(|earlier| matching.matches(earlier, placeholder))
        {
            return Err(RegistryError::DuplicatePlaceholder {
                route: name,
                placeholder: placeholder.clone(),
            });
        }
    }

    // Each placeholder claims exactly one PATH declaration.
    let mut claimed = vec![false; parameters.len()];
    for placeholder in &placeholders {
        let idx = parameters
            .iter()
            .enumerate()
            .position(|(i, p)| {
                !claimed[i]
                    && p.location == ParameterLocation::Path
                    && matching.matches(placeholder, &p.name)
            })
            .ok_or_else(|| RegistryError::UnboundPlaceholder {
                route: name.clone(),
                placeholder: placeholder.clone(),
            })?;
        claimed[idx] = true;
        if parameters[idx].name != *placeholder {
            template.rename_placeholder(placeholder, &parameters[idx].name);
        }
    }

    if let Some(orphan) = parameters
        .iter()
        .zip(&claimed)
        .find(|(p, claimed)| p.location == ParameterLocation::Path && !**claimed)
        .map(|(p, _)| p)
    {
        return Err(RegistryError::OrphanPathParam {
            route: name,
            param: orphan.name.clone(),
        });
    }

    Ok(RouteDefinition {
        name,
        method,
        path_template: template,
        parameters,
        operation_id,
        summary,
        description,
        tags,
    })
}

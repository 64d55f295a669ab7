//! Symbolic route names.
//!
//! A route is named after its `operationId` converted to kebab-case
//! (`getUser`, `GetUser` and `get_user` all become `get-user`). Operations
//! without an id are named from the HTTP method followed by every path
//! segment with braces dropped: `GET /users/{id}/posts` becomes
//! `get-users-id-posts` and `GET /` becomes `get`. Callers look routes up by
//! these names, so the derivation must not change.

use heck::ToKebabCase;
use http::Method;

/// Name for an operation.
#[must_use]
pub fn route_name(operation_id: Option<&str>, method: &Method, path: &str) -> String {
    match operation_id {
        Some(id) => id.to_kebab_case(),
        None => derived_name(method, path),
    }
}

/// Name for an operation without an `operationId`.
#[must_use]
pub fn derived_name(method: &Method, path: &str) -> String {
    format!("{} {}", method.as_str(), path).to_kebab_case()
}

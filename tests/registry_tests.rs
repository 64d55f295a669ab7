#![allow(clippy::unwrap_used, clippy::expect_used)]

use http::Method;
use martian::registry::naming::route_name;
use martian::registry::RouteRegistry;
use martian::{spec, PlaceholderMatching, RegistryError, RouteNotFoundError};

mod common;
use common::{PETSTORE_SWAGGER2, SHOP_OPENAPI3};

fn build(raw: &str) -> Result<RouteRegistry, RegistryError> {
    RouteRegistry::build(spec::load(raw).unwrap(), PlaceholderMatching::Exact)
}

#[test]
fn test_names_from_operation_ids_and_derived() {
    let registry = build(PETSTORE_SWAGGER2).unwrap();
    let names: Vec<_> = registry.routes().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "list-pets",
            "create-pet",
            "show-pet-by-id",
            "delete-pets-pet-id",
            "upload-photo",
        ]
    );
    assert_eq!(registry.base_path(), "/v2");
}

#[test]
fn test_every_name_round_trips() {
    for raw in [PETSTORE_SWAGGER2, SHOP_OPENAPI3] {
        let registry = build(raw).unwrap();
        for route in registry.routes() {
            assert_eq!(registry.lookup(&route.name).unwrap().name, route.name);
            assert!(registry.contains(&route.name));
        }
    }
}

#[test]
fn test_derived_name_without_operation_id() {
    let registry = build(SHOP_OPENAPI3).unwrap();
    let health = registry.lookup("get-health").unwrap();
    assert_eq!(health.method, Method::GET);
    assert_eq!(health.summary.as_deref(), Some("Health probe"));
    assert!(health.operation_id.is_none());
}

#[test]
fn test_route_definition_fields() {
    let registry = build(PETSTORE_SWAGGER2).unwrap();
    let route = registry.lookup("show-pet-by-id").unwrap();
    assert_eq!(route.path_template.as_str(), "/pets/{petId}");
    assert_eq!(route.signature(), "GET /pets/{petId}");
    assert_eq!(route.path_parameters().count(), 1);
    assert!(route.parameter("petId").is_some());
    assert!(route.parameter("nope").is_none());
}

#[test]
fn test_unknown_name() {
    let registry = build(PETSTORE_SWAGGER2).unwrap();
    assert_eq!(
        registry.lookup("no-such-route").unwrap_err(),
        RouteNotFoundError {
            name: "no-such-route".to_string()
        }
    );
    assert!(registry.get("no-such-route").is_none());
}

#[test]
fn test_duplicate_name_from_operation_ids() {
    let err = build(
        r#"{"paths": {
            "/a": {"get": {"operationId": "getThing"}},
            "/b": {"get": {"operationId": "get_thing"}}
        }}"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateName {
            name: "get-thing".to_string(),
            first: "GET /a".to_string(),
            second: "GET /b".to_string(),
        }
    );
}

#[test]
fn test_duplicate_name_between_id_and_derived() {
    // `GET /users` derives `get-users`, which collides with the explicit id.
    let err = build(
        r#"{"paths": {
            "/users": {"get": {}},
            "/people": {"get": {"operationId": "getUsers"}}
        }}"#,
    )
    .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName { ref name, .. } if name == "get-users"));
}

#[test]
fn test_unbound_placeholder() {
    let err = build(r#"{"paths": {"/users/{id}": {"get": {"operationId": "getUser"}}}}"#)
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnboundPlaceholder {
            route: "get-user".to_string(),
            placeholder: "id".to_string(),
        }
    );
}

#[test]
fn test_orphan_path_param() {
    let err = build(
        r#"{"paths": {"/users": {"get": {"operationId": "listUsers", "parameters": [
            {"name": "id", "in": "path", "required": true, "type": "string"}
        ]}}}}"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        RegistryError::OrphanPathParam {
            route: "list-users".to_string(),
            param: "id".to_string(),
        }
    );
}

#[test]
fn test_query_param_does_not_bind_placeholder() {
    let err = build(
        r#"{"paths": {"/users/{id}": {"get": {"parameters": [
            {"name": "id", "in": "query", "type": "string"}
        ]}}}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, RegistryError::UnboundPlaceholder { .. }));
}

#[test]
fn test_malformed_template() {
    let err = build(r#"{"paths": {"/users/{id": {"get": {"operationId": "bad"}}}}"#).unwrap_err();
    assert!(matches!(err, RegistryError::MalformedTemplate { ref template, .. } if template == "/users/{id"));
}

#[test]
fn test_case_insensitive_placeholder_matching() {
    let raw = r#"{"paths": {"/users/{ID}": {"get": {"operationId": "getUser", "parameters": [
        {"name": "id", "in": "path", "required": true, "type": "integer"}
    ]}}}}"#;

    assert!(matches!(
        build(raw).unwrap_err(),
        RegistryError::UnboundPlaceholder { .. }
    ));

    let registry =
        RouteRegistry::build(spec::load(raw).unwrap(), PlaceholderMatching::CaseInsensitive)
            .unwrap();
    let route = registry.lookup("get-user").unwrap();
    assert_eq!(route.path_template.placeholders().collect::<Vec<_>>(), ["id"]);
}

#[test]
fn test_naming_is_stable() {
    assert_eq!(route_name(None, &Method::GET, "/users/{id}/posts"), "get-users-id-posts");
    assert_eq!(route_name(None, &Method::GET, "/"), "get");
    assert_eq!(route_name(Some("showPetById"), &Method::GET, "/pets/{petId}"), "show-pet-by-id");
}

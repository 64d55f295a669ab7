#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub const API_ROOT: &str = "https://api.example.com";

/// Swagger 2 description used across the integration tests.
pub const PETSTORE_SWAGGER2: &str = r##"{
  "swagger": "2.0",
  "info": { "title": "Pet Store", "version": "1.0" },
  "host": "petstore.example.com",
  "basePath": "/v2",
  "parameters": {
    "PetId": { "name": "petId", "in": "path", "required": true, "type": "integer" }
  },
  "paths": {
    "/pets": {
      "get": {
        "operationId": "listPets",
        "summary": "List all pets",
        "tags": ["pets"],
        "parameters": [
          { "name": "limit", "in": "query", "type": "integer" },
          { "name": "tags", "in": "query", "type": "array", "items": { "type": "string" } }
        ]
      },
      "post": {
        "operationId": "createPet",
        "parameters": [
          { "name": "pet", "in": "body", "required": true, "schema": { "type": "object" } },
          { "name": "X-Request-Id", "in": "header", "type": "string" }
        ]
      }
    },
    "/pets/{petId}": {
      "parameters": [ { "$ref": "#/parameters/PetId" } ],
      "get": { "operationId": "showPetById", "summary": "Info for a specific pet" },
      "delete": {
        "parameters": [ { "name": "session", "in": "cookie", "type": "string" } ]
      }
    },
    "/pets/{petId}/photo": {
      "post": {
        "operationId": "uploadPhoto",
        "consumes": ["multipart/form-data"],
        "parameters": [
          { "name": "petId", "in": "path", "required": true, "type": "integer" },
          { "name": "caption", "in": "formData", "type": "string" }
        ]
      }
    }
  }
}"##;

/// OpenAPI 3 description with a server-relative base path.
pub const SHOP_OPENAPI3: &str = r##"openapi: 3.0.3
info:
  title: Shop
  version: "1.0"
servers:
  - url: https://shop.example.com/api/v1
components:
  parameters:
    OrderId:
      name: orderId
      in: path
      required: true
      schema: { type: string }
  schemas:
    Order:
      type: object
paths:
  /orders:
    get:
      operationId: listOrders
      summary: List orders
      parameters:
        - name: status
          in: query
          schema: { type: string, default: open }
        - name: page
          in: query
          required: true
          schema: { type: integer, default: 1 }
    post:
      operationId: createOrder
      requestBody:
        required: true
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Order' }
  /orders/{orderId}:
    get:
      operationId: getOrder
      parameters:
        - $ref: '#/components/parameters/OrderId'
        - name: expand
          in: query
          schema:
            type: array
            items: { type: string }
  /health:
    get:
      summary: Health probe
"##;

/// The two routes used throughout the examples in the docs.
pub const USERS_AND_ORDERS: &str = r#"{
  "swagger": "2.0",
  "paths": {
    "/users/{id}": {
      "get": {
        "operationId": "getUser",
        "parameters": [
          { "name": "id", "in": "path", "required": true, "type": "integer" }
        ]
      }
    },
    "/orders": {
      "get": {
        "operationId": "listOrders",
        "parameters": [
          { "name": "status", "in": "query", "type": "string" }
        ]
      }
    }
  }
}"#;

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temp file with the given extension. The file is
    /// removed when the handle drops.
    pub fn create_temp_spec(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("martian_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_spec(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_spec(content, "json")
    }
}

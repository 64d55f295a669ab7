//! # Spec Module
//!
//! Turns a Swagger 2.0 or OpenAPI 3.x document into an [`ApiDescription`]: the
//! base path plus a flat, ordered list of operations with their merged
//! parameter declarations.
//!
//! Loading is a pure transform over text or an already parsed
//! [`serde_json::Value`]; reading the file is left to the caller.

mod load;
mod types;

pub use load::*;
pub use types::*;

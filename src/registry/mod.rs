//! # Registry Module
//!
//! Builds the named-route registry from an [`ApiDescription`](crate::spec::ApiDescription).
//!
//! Building checks, for every operation:
//! - its name (from `operationId` or derived from method and path) is unique
//! - its path template is well formed
//! - every `{placeholder}` has exactly one PATH declaration
//! - every PATH declaration has exactly one placeholder
//!
//! A built [`RouteRegistry`] is never mutated. Re-bootstrapping produces a new
//! registry; see [`hot_reload`](crate::hot_reload) for publishing one atomically.

mod core;
pub mod naming;
mod template;

pub use core::{RouteDefinition, RouteRegistry};
pub use template::{PathTemplate, Segment};

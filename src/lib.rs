//! # martian
//!
//! **martian** turns a Swagger 2.0 or OpenAPI 3.x description into a registry of
//! named routes, then builds URLs and request descriptors from a route name and
//! a set of parameters. Callers never hand-assemble paths or query strings.
//!
//! ## Architecture
//!
//! - **[`spec`]** - parses the description (JSON or YAML) into operations and
//!   parameter declarations
//! - **[`registry`]** - names every operation and checks placeholders against
//!   path parameters
//! - **[`binder`]** - validates and coerces supplied values against a route's
//!   declarations
//! - **[`resolver`]** - substitutes path values and encodes the query string
//! - **[`client`]** - the public entry point tying the above together
//! - **[`hot_reload`]** - swaps in a rebuilt client when the description changes
//! - **[`config`]** / **[`logging`]** - options and subscriber setup
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Client
//!     participant Registry as RouteRegistry
//!     participant Binder as binder::bind
//!     participant Resolver as resolver::resolve
//!
//!     App->>Client: Client::new(root, description, options)
//!     Client->>Registry: RouteRegistry::build(spec::load(..))
//!     App->>Client: url_for_with("get-user", {id: 42})
//!     Client->>Registry: lookup("get-user")
//!     Client->>Binder: bind(route, params)
//!     Client->>Resolver: resolve(root, route, bound)
//!     Resolver-->>App: https://api.example.com/users/42
//! ```
//!
//! ## Route Names
//!
//! A route is named after its `operationId` in kebab-case (`getUser` becomes
//! `get-user`). Operations without an id are named from method and path:
//! `GET /users/{id}/posts` becomes `get-users-id-posts`.
//!
//! ## Quick Start
//!
//! ```
//! use martian::{Client, ClientOptions, Params};
//!
//! let description = r#"
//! swagger: "2.0"
//! paths:
//!   /orders:
//!     get:
//!       operationId: listOrders
//!       parameters:
//!         - { name: status, in: query, type: string }
//! "#;
//!
//! let client = Client::new("https://api.example.com", description, ClientOptions::default())?;
//! assert_eq!(client.url_for("list-orders")?, "https://api.example.com/orders");
//! assert_eq!(
//!     client.url_for_with("list-orders", &Params::new().with("status", "open"))?,
//!     "https://api.example.com/orders?status=open"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binder;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod hot_reload;
pub mod logging;
pub mod registry;
pub mod resolver;
pub mod spec;

pub use binder::{BoundParameters, Params};
pub use client::{Client, RequestDescriptor, RouteSummary};
pub use config::{ClientOptions, PlaceholderMatching, UnknownParams};
pub use error::{
    BindingError, BootstrapError, RegistryError, ResolveError, RouteNotFoundError,
    SpecParseError,
};
pub use hot_reload::SharedClient;
pub use registry::{RouteDefinition, RouteRegistry};
pub use spec::{ApiDescription, ParamType, ParameterDeclaration, ParameterLocation};

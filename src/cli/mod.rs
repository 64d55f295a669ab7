//! # CLI Module
//!
//! Command-line access to a description's routes, mostly for checking what a
//! client would produce.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List every route as `name METHOD path summary`:
//!
//! ```bash
//! martian routes --spec openapi.yaml
//! ```
//!
//! ### `url-for`
//!
//! Print the URL of one route:
//!
//! ```bash
//! martian url-for --spec openapi.yaml --root https://api.example.com \
//!     --route get-user -p id=42
//! ```
//!
//! `-p key=value` may be repeated. Values that parse as JSON (`42`, `true`,
//! `[1,2]`) are passed as JSON, anything else as a string.
//!
//! ### `request`
//!
//! Same arguments as `url-for`; prints the full request descriptor as JSON.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use martian::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse(), &mut std::io::stdout())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{parse_param, run_cli, Cli, Commands, ResolveArgs};

//! # Client Configuration
//!
//! [`ClientOptions`] tunes how a [`Client`](crate::Client) is bootstrapped and
//! how it binds parameters. Options can be built in code, deserialized from a
//! YAML file or read from the environment.
//!
//! ## Environment Variables
//!
//! - `MARTIAN_BASE_PATH` - replaces the base path declared by the description
//! - `MARTIAN_PLACEHOLDER_MATCHING` - `exact` (default) or `case-insensitive`
//! - `MARTIAN_ALLOW_UNKNOWN_PARAMS` - `true` (default) or `false`
//!
//! Unrecognized values log a warning and keep the default.
//!
//! ## YAML
//!
//! ```yaml
//! base-path: /v2
//! placeholder-matching: case-insensitive
//! unknown-params: reject
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::warn;

/// How a path parameter name is matched against a `{placeholder}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderMatching {
    /// Names must be byte-for-byte equal.
    #[default]
    Exact,
    /// Names are compared ignoring ASCII case.
    CaseInsensitive,
}

impl PlaceholderMatching {
    #[inline]
    #[must_use]
    pub fn matches(self, placeholder: &str, param: &str) -> bool {
        match self {
            PlaceholderMatching::Exact => placeholder == param,
            PlaceholderMatching::CaseInsensitive => placeholder.eq_ignore_ascii_case(param),
        }
    }

    /// Lenient parse; unknown names mean [`PlaceholderMatching::Exact`].
    pub fn parse(s: &str) -> Self {
        Self::from_name(s).unwrap_or_default()
    }

    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Some(PlaceholderMatching::Exact),
            "case-insensitive" | "case_insensitive" | "insensitive" => {
                Some(PlaceholderMatching::CaseInsensitive)
            }
            _ => None,
        }
    }
}

/// What to do with supplied parameters the route does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownParams {
    /// Append them to the query string in the order supplied.
    #[default]
    Permit,
    /// Fail with [`BindingError::UnknownParameter`](crate::BindingError::UnknownParameter).
    Reject,
}

/// Options recognized when building a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientOptions {
    /// Replaces the description's `basePath` / server path when set.
    pub base_path: Option<String>,
    pub placeholder_matching: PlaceholderMatching,
    pub unknown_params: UnknownParams,
}

impl ClientOptions {
    /// Load options from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let base_path = env::var("MARTIAN_BASE_PATH").ok();
        let placeholder_matching = match env::var("MARTIAN_PLACEHOLDER_MATCHING") {
            Ok(v) => PlaceholderMatching::from_name(&v).unwrap_or_else(|| {
                warn!(
                    var = "MARTIAN_PLACEHOLDER_MATCHING",
                    value = %v,
                    "unrecognized placeholder matching, using exact"
                );
                PlaceholderMatching::Exact
            }),
            Err(_) => PlaceholderMatching::default(),
        };
        let unknown_params = match env::var("MARTIAN_ALLOW_UNKNOWN_PARAMS") {
            Ok(v) => match v.trim().to_lowercase().parse::<bool>() {
                Ok(true) => UnknownParams::Permit,
                Ok(false) => UnknownParams::Reject,
                Err(_) => {
                    warn!(
                        var = "MARTIAN_ALLOW_UNKNOWN_PARAMS",
                        value = %v,
                        "expected true or false, permitting unknown parameters"
                    );
                    UnknownParams::Permit
                }
            },
            Err(_) => UnknownParams::default(),
        };

        ClientOptions {
            base_path,
            placeholder_matching,
            unknown_params,
        }
    }

    /// Read options from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid options file {}", path.display()))
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    #[must_use]
    pub fn with_placeholder_matching(mut self, matching: PlaceholderMatching) -> Self {
        self.placeholder_matching = matching;
        self
    }

    #[must_use]
    pub fn with_unknown_params(mut self, policy: UnknownParams) -> Self {
        self.unknown_params = policy;
        self
    }
}

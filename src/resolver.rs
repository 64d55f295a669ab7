//! # URL Resolution
//!
//! Produces the final URL for a route from bound parameters:
//!
//! ```text
//! api_root + "/" + substituted path + ["?" + k=v&k=v]
//! ```
//!
//! Path values, query keys and query values are percent-encoded with
//! [`urlencoding::encode`]: everything except `A-Z a-z 0-9 - _ . ~` is
//! escaped and a space becomes `%20`. A path value of exactly `.` or `..` is
//! written as `%2E` / `%2E%2E` so it never forms a dot-segment. Empty path
//! values are rejected earlier, during binding. Resolution is pure, so
//! identical inputs always give the identical string.

use crate::binder::BoundParameters;
use crate::registry::{RouteDefinition, Segment};

/// Build the URL for `route` under `api_root`.
///
/// # Panics
///
/// Panics when a placeholder has no bound value. Binding fills every PATH
/// declaration and the registry pairs each placeholder with one PATH
/// declaration, so this only happens when those invariants are broken.
#[must_use]
#[allow(clippy::panic)]
pub fn resolve(api_root: &str, route: &RouteDefinition, bound: &BoundParameters) -> String {
    let root = api_root.trim_end_matches('/');
    let mut path = String::with_capacity(route.path_template.as_str().len() + 16);

    for segment in route.path_template.segments() {
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Placeholder(name) => {
                let Some(value) = bound.path_values.get(name) else {
                    panic!(
                        "route `{}`: no bound value for placeholder `{{{}}}`",
                        route.name, name
                    );
                };
                push_path_value(&mut path, value);
            }
        }
    }

    let mut url = String::with_capacity(root.len() + path.len() + 1);
    url.push_str(root);
    url.push('/');
    url.push_str(path.trim_start_matches('/'));
    append_query(&mut url, &bound.query_pairs);
    url
}

fn push_path_value(path: &mut String, value: &str) {
    match value {
        "." => path.push_str("%2E"),
        ".." => path.push_str("%2E%2E"),
        other => path.push_str(&urlencoding::encode(other)),
    }
}

/// Append `?k=v&k=v` when there are pairs.
pub fn append_query(url: &mut String, pairs: &[(String, String)]) {
    for (idx, (key, value)) in pairs.iter().enumerate() {
        url.push(if idx == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
}

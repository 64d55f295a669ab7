//! # Parameter Binding
//!
//! Checks caller-supplied parameters against a [`RouteDefinition`], coerces
//! each value to its declared wire form and partitions the result by location.
//!
//! ## Rules
//!
//! - A required declaration (PATH declarations always are) that is absent or
//!   `null` takes its declared default, otherwise binding fails with
//!   [`BindingError::MissingRequired`]. Absent optional declarations are left
//!   out, defaults included.
//! - Values that cannot be coerced fail with [`BindingError::TypeMismatch`].
//!   INTEGER accepts the `i64` and `u64` ranges, whether given as a JSON
//!   integer, an integral float or a numeric string.
//! - A PATH value that encodes to the empty string fails with
//!   [`BindingError::EmptyPathValue`].
//! - ARRAY values in the query become repeated `key=value` pairs. In the path,
//!   headers and cookies they are joined with `,`.
//! - BODY values pass through untouched.
//! - Parameters the route does not declare are appended to the query string in
//!   the order supplied, or rejected under [`UnknownParams::Reject`].

use crate::config::UnknownParams;
use crate::error::BindingError;
use crate::registry::RouteDefinition;
use crate::spec::{ParamType, ParameterDeclaration, ParameterLocation};
use serde_json::{Map, Number, Value};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Pairs stored inline before spilling to the heap. Most routes carry a
/// handful of query parameters.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Ordered `(name, encoded value)` pairs.
pub type PairVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// Caller-supplied parameters, keyed by name, in insertion order.
///
/// Order matters for parameters the route does not declare: they reach the
/// query string in the order they were inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Params::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a parameter. Re-inserting a name replaces the value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl TryFrom<Value> for Params {
    /// The value is handed back when it is not a JSON object.
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into()),
            other => Err(other),
        }
    }
}

/// Validated, encoded parameters of one resolution call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParameters {
    /// Placeholder name to unescaped value.
    pub path_values: HashMap<String, String>,
    /// Declared query parameters first, then undeclared ones.
    pub query_pairs: PairVec,
    pub headers: PairVec,
    pub cookies: PairVec,
    pub form: PairVec,
    pub body: Option<Value>,
}

/// A coerced value: one string, or several for arrays.
#[derive(Debug, Clone, PartialEq)]
enum Encoded {
    Single(String),
    Multi(Vec<String>),
}

impl Encoded {
    fn joined(self) -> String {
        match self {
            Encoded::Single(s) => s,
            Encoded::Multi(items) => items.join(","),
        }
    }

    fn push_pairs(self, name: &str, out: &mut PairVec) {
        match self {
            Encoded::Single(s) => out.push((name.to_string(), s)),
            Encoded::Multi(items) => {
                out.extend(items.into_iter().map(|item| (name.to_string(), item)));
            }
        }
    }
}

/// Bind `supplied` against the declarations of `route`.
///
/// # Errors
///
/// See the module documentation for when each [`BindingError`] is returned.
pub fn bind(
    route: &RouteDefinition,
    supplied: &Params,
    unknown: UnknownParams,
) -> Result<BoundParameters, BindingError> {
    let mut bound = BoundParameters::default();

    for decl in &route.parameters {
        let value = match supplied.get(&decl.name).filter(|v| !v.is_null()) {
            Some(value) => value,
            None if !decl.is_required() => continue,
            None => decl
                .default
                .as_ref()
                .ok_or_else(|| BindingError::MissingRequired {
                    name: decl.name.clone(),
                })?,
        };

        if decl.location == ParameterLocation::Body {
            bound.body = Some(value.clone());
            continue;
        }

        let encoded = coerce(decl, value)?;
        match decl.location {
            ParameterLocation::Path => {
                let value = encoded.joined();
                if value.is_empty() {
                    return Err(BindingError::EmptyPathValue {
                        name: decl.name.clone(),
                    });
                }
                bound.path_values.insert(decl.name.clone(), value);
            }
            ParameterLocation::Query => encoded.push_pairs(&decl.name, &mut bound.query_pairs),
            ParameterLocation::Form => encoded.push_pairs(&decl.name, &mut bound.form),
            ParameterLocation::Header => bound.headers.push((decl.name.clone(), encoded.joined())),
            ParameterLocation::Cookie => bound.cookies.push((decl.name.clone(), encoded.joined())),
            ParameterLocation::Body => {}
        }
    }

    for (name, value) in supplied.iter() {
        if value.is_null() || route.parameter(name).is_some() {
            continue;
        }
        match unknown {
            UnknownParams::Reject => {
                return Err(BindingError::UnknownParameter {
                    name: name.to_string(),
                })
            }
            UnknownParams::Permit => render_untyped(value).push_pairs(name, &mut bound.query_pairs),
        }
    }

    Ok(bound)
}

fn coerce(decl: &ParameterDeclaration, value: &Value) -> Result<Encoded, BindingError> {
    let mismatch = || BindingError::TypeMismatch {
        name: decl.name.clone(),
        expected: decl.param_type,
        found: describe(value),
    };

    match decl.param_type {
        ParamType::Array => {
            let item_type = decl.items.unwrap_or(ParamType::String);
            let items = match value {
                Value::Array(items) => items.as_slice(),
                single => std::slice::from_ref(single),
            };
            items
                .iter()
                .map(|item| coerce_scalar(item, item_type).ok_or_else(mismatch))
                .collect::<Result<Vec<_>, _>>()
                .map(Encoded::Multi)
        }
        scalar => coerce_scalar(value, scalar)
            .map(Encoded::Single)
            .ok_or_else(mismatch),
    }
}

fn coerce_scalar(value: &Value, ty: ParamType) -> Option<String> {
    match (ty, value) {
        (ParamType::String, Value::String(s)) => Some(s.clone()),
        (ParamType::String, Value::Number(n)) => Some(n.to_string()),
        (ParamType::String, Value::Bool(b)) => Some(b.to_string()),

        (ParamType::Integer, Value::Number(n)) => integer_text(n),
        (ParamType::Integer, Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(|i| i.to_string())
                .or_else(|_| s.parse::<u64>().map(|u| u.to_string()))
                .ok()
        }

        (ParamType::Number, Value::Number(n)) => Some(n.to_string()),
        (ParamType::Number, Value::String(s)) => {
            let s = s.trim();
            s.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|_| s.to_string())
        }

        (ParamType::Boolean, Value::Bool(b)) => Some(b.to_string()),
        (ParamType::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some("true".to_string()),
            "false" => Some("false".to_string()),
            _ => None,
        },

        _ => None,
    }
}

/// Integers, including floats with no fractional part (`42.0`).
///
/// Floats are accepted over the `i64` and `u64` ranges combined. Both upper
/// bounds cast to a power of two, so they are exclusive; anything outside is
/// rejected rather than saturated.
fn integer_text(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0)?;
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some((f as i64).to_string())
    } else if f >= 0.0 && f < u64::MAX as f64 {
        Some((f as u64).to_string())
    } else {
        None
    }
}

/// Rendering for values with no declaration to coerce against.
fn render_untyped(value: &Value) -> Encoded {
    match value {
        Value::Array(items) => Encoded::Multi(items.iter().map(untyped_scalar).collect()),
        other => Encoded::Single(untyped_scalar(other)),
    }
}

fn untyped_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn describe(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("{kind} {value}")
}

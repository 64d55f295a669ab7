use http::Method;
use serde_json::Value;

/// Where a parameter travels in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    /// Swagger 2 `formData` field.
    Form,
    Body,
}

impl ParameterLocation {
    /// Map the `in` field of a parameter object.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            "formdata" => Some(ParameterLocation::Form),
            "body" => Some(ParameterLocation::Body),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
            ParameterLocation::Form => write!(f, "formData"),
            ParameterLocation::Body => write!(f, "body"),
        }
    }
}

/// Declared wire type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
}

impl ParamType {
    /// Map a JSON Schema `type` keyword. Types a URL cannot carry natively
    /// (`object`, `file`) are sent as strings.
    pub fn from_declared(raw: Option<&str>) -> Self {
        match raw {
            Some("integer") => ParamType::Integer,
            Some("number") => ParamType::Number,
            Some("boolean") => ParamType::Boolean,
            Some("array") => ParamType::Array,
            _ => ParamType::String,
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
        };
        write!(f, "{s}")
    }
}

/// A single declared parameter of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    pub name: String,
    pub location: ParameterLocation,
    /// Flag as declared; see [`ParameterDeclaration::is_required`].
    pub required: bool,
    pub param_type: ParamType,
    /// Element type when `param_type` is [`ParamType::Array`].
    pub items: Option<ParamType>,
    pub default: Option<Value>,
}

impl ParameterDeclaration {
    /// Path parameters are required whatever the document says.
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required || self.location == ParameterLocation::Path
    }
}

/// One operation (method + path) of the description.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub operation_id: Option<String>,
    pub method: Method,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterDeclaration>,
}

/// The parsed API description handed from the loader to the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiDescription {
    /// Base path from `basePath` or `servers[0].url`, without trailing slash.
    pub base_path: String,
    /// Operations in document order.
    pub operations: Vec<Operation>,
}

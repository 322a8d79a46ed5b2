//! Inbound query shapes.

use serde_json::Value;

/// Field carrying the user's text, both at the top level of a request body
/// and inside the wrapped object form.
pub const USER_LOCATION_FIELD: &str = "userLocation";

/// Location text as it arrives from the form.
///
/// Callers send either a plain string or an object wrapping the string in
/// its own `userLocation` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    Text(String),
    Wrapped {
        user_location: String,
        /// Number of fields the wrapping object carried
        field_count: usize,
    },
    Absent,
}

impl QueryInput {
    /// Classify a JSON value taken from the `userLocation` field of a request.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Object(fields)) => Self::Wrapped {
                user_location: fields
                    .get(USER_LOCATION_FIELD)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                field_count: fields.len(),
            },
            _ => Self::Absent,
        }
    }
}

impl From<&str> for QueryInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for QueryInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A cleaned query, derived once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Text as received, before trimming
    pub raw: String,
    /// Display form, passed to the gazetteer
    pub trimmed: String,
    /// Match key
    pub upper: String,
    pub is_blank: bool,
}

/// Gazetteer domain a query is issued against. Only the UK gazetteer is
/// served.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocationType {
    #[default]
    UkLocation,
    Other(String),
}

impl LocationType {
    pub fn parse(value: &str) -> Self {
        match value {
            "uk-location" => Self::UkLocation,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::UkLocation)
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationType::UkLocation => write!(f, "uk-location"),
            LocationType::Other(name) => write!(f, "{}", name),
        }
    }
}

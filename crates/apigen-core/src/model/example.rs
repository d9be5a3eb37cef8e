//! Example values embedded in the API description.
//!
//! Example values are plain JSON. Their meaning depends on the declared type
//! they are synthesized against: an object is a struct field map or a union
//! selection, a string may be text, a timestamp, a byte payload or a bare
//! void union tag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reserved key carrying the discriminant tag of a subtype or union selection.
pub const TAG_KEY: &str = ".tag";

/// A literal value from an example or a field default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExampleValue {
    /// Explicitly absent
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Integer(i64),
    /// Integer literal above `i64::MAX`
    Unsigned(u64),
    /// Floating point literal
    Float(f64),
    /// Text literal
    String(String),
    /// Sequence of values
    List(Vec<ExampleValue>),
    /// Nested struct example or union selection
    Object(ExampleObject),
}

impl ExampleValue {
    /// Returns a short description of the value's kind for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::Unsigned(_) => "integer",
            Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` for [`ExampleValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Builds a union selection `{".tag": tag}` with an optional payload
    /// stored under the tag name.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::ExampleValue;
    ///
    /// let selection = ExampleValue::selection("add", None);
    /// let object = selection.as_object().unwrap();
    /// assert_eq!(object.tag(), Some("add"));
    /// ```
    pub fn selection(tag: impl Into<String>, payload: Option<Self>) -> Self {
        let tag = tag.into();
        let mut object = ExampleObject::new().with(TAG_KEY, Self::String(tag.clone()));
        if let Some(payload) = payload {
            object.insert(tag, payload);
        }
        Self::Object(object)
    }

    /// Returns the object payload, if this value is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ExampleObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl fmt::Display for ExampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str(self.kind_name()),
        }
    }
}

impl From<bool> for ExampleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ExampleValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ExampleValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for ExampleValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Integer)
    }
}

impl From<f64> for ExampleValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ExampleValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ExampleValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for ExampleValue {
    fn from(values: Vec<Self>) -> Self {
        Self::List(values)
    }
}

impl From<ExampleObject> for ExampleValue {
    fn from(object: ExampleObject) -> Self {
        Self::Object(object)
    }
}

/// Mapping of field name to value.
///
/// Key order carries no meaning: synthesized expressions follow declared
/// field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleObject(BTreeMap<String, ExampleValue>);

impl ExampleObject {
    /// Creates an empty object.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a key, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ExampleValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts a key, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ExampleValue>) -> Option<ExampleValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Looks up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ExampleValue> {
        self.0.get(key)
    }

    /// Returns the discriminant tag, if the `.tag` key holds a string.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self.0.get(TAG_KEY) {
            Some(ExampleValue::String(tag)) => Some(tag),
            _ => None,
        }
    }

    /// Returns a copy without the `.tag` key.
    #[must_use]
    pub fn without_tag(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(key, _)| key.as_str() != TAG_KEY)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExampleValue)> {
        self.0.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ExampleValue)> for ExampleObject {
    fn from_iter<T: IntoIterator<Item = (String, ExampleValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A named example attached to a struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Free-text description of what the example shows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Field values of the example
    pub value: ExampleObject,
}

impl Example {
    /// Creates an example without description.
    #[must_use]
    pub const fn new(value: ExampleObject) -> Self {
        Self { text: None, value }
    }
}

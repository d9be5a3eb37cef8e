//! Operator-supplied extra route arguments.
//!
//! An extra-argument rule documents an additional argument on every route
//! whose attributes contain a given key/value pair. Rules arrive as raw JSON
//! entries of the form
//!
//! ```json
//! {"match": ["auth", "user"], "arg_name": "selectUser", "arg_type": "String",
//!  "arg_docstring": "Team member to act as."}
//! ```
//!
//! and are validated eagerly, before any artifact is produced. A malformed
//! entry is reported with the entry verbatim.

use apigen_core::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

/// A documented argument injected into matching routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraArg {
    /// Argument name
    pub name: String,
    /// Argument type, as written in documentation
    pub arg_type: String,
    /// Optional description
    pub doc: Option<String>,
}

/// Validated extra-argument rules keyed by attribute key, then value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraArgs {
    rules: IndexMap<String, IndexMap<String, ExtraArg>>,
}

fn invalid(entry: &str, message: impl Into<String>) -> Error {
    Error::ConfigError {
        entry: entry.to_string(),
        message: message.into(),
    }
}

fn parse_entry(raw: &str) -> Result<(String, String, ExtraArg)> {
    let value: Value = serde_json::from_str(raw).map_err(|e| invalid(raw, e.to_string()))?;
    let Some(entry) = value.as_object() else {
        return Err(invalid(raw, "entry is not a JSON object"));
    };

    let matcher = entry.get("match").ok_or_else(|| invalid(raw, "No match key"))?;
    let pair = matcher
        .as_array()
        .filter(|pair| pair.len() == 2)
        .ok_or_else(|| invalid(raw, "match key is not a list of two strings"))?;
    let (Some(key), Some(expected)) = (pair[0].as_str(), pair[1].as_str()) else {
        return Err(invalid(raw, "match values are not strings"));
    };

    let name = entry
        .get("arg_name")
        .ok_or_else(|| invalid(raw, "No arg_name key"))?
        .as_str()
        .ok_or_else(|| invalid(raw, "arg_name is not a string"))?;
    let arg_type = entry
        .get("arg_type")
        .ok_or_else(|| invalid(raw, "No arg_type key"))?
        .as_str()
        .ok_or_else(|| invalid(raw, "arg_type is not a string"))?;
    let doc = match entry.get("arg_docstring") {
        None => None,
        Some(Value::String(doc)) => Some(doc.clone()),
        Some(_) => return Err(invalid(raw, "arg_docstring is not a string")),
    };

    Ok((
        key.to_string(),
        expected.to_string(),
        ExtraArg {
            name: name.to_string(),
            arg_type: arg_type.to_string(),
            doc,
        },
    ))
}

impl ExtraArgs {
    /// Validates raw JSON entries.
    ///
    /// When two entries match the same attribute key and value, the first
    /// one is kept and the duplicate is reported as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] naming the first malformed entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_codegen::extra_args::ExtraArgs;
    ///
    /// let rules = ExtraArgs::parse([
    ///     r#"{"match": ["auth", "user"], "arg_name": "selectUser", "arg_type": "String"}"#,
    /// ]).unwrap();
    /// assert_eq!(rules.len(), 1);
    ///
    /// let err = ExtraArgs::parse([r#"{"arg_name": "x"}"#]).unwrap_err();
    /// assert!(err.to_string().contains("No match key"));
    /// ```
    pub fn parse<I, S>(raw_entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules: IndexMap<String, IndexMap<String, ExtraArg>> = IndexMap::new();
        for raw in raw_entries {
            let raw = raw.as_ref();
            let (key, expected, arg) = parse_entry(raw)?;
            let by_value = rules.entry(key.clone()).or_default();
            if by_value.contains_key(&expected) {
                warn!(attr = %key, value = %expected, entry = raw, "ignoring duplicate extra argument rule");
                continue;
            }
            by_value.insert(expected, arg);
        }
        Ok(Self { rules })
    }

    /// Splits a JSON array document into raw entries, for rules supplied in
    /// a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the document is not a JSON array.
    pub fn entries_from_document(document: &str) -> Result<Vec<String>> {
        let values: Vec<Value> =
            serde_json::from_str(document).map_err(|e| invalid(document.trim(), e.to_string()))?;
        Ok(values.iter().map(Value::to_string).collect())
    }

    /// Rules matching `attrs`, in attribute order.
    pub fn matching<'a>(
        &'a self,
        attrs: &'a IndexMap<String, String>,
    ) -> impl Iterator<Item = &'a ExtraArg> + 'a {
        attrs.iter().filter_map(|(key, value)| {
            self.rules.get(key).and_then(|by_value| by_value.get(value))
        })
    }

    /// Total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.values().map(IndexMap::len).sum()
    }

    /// Whether there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

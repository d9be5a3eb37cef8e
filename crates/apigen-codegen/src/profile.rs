//! Type profiles: per-ecosystem naming and type spelling configuration.
//!
//! A profile is plain data loaded from TOML. It supplies primitive and
//! container spellings, reserved words and prefixes, casing rules and the
//! dialect that renders the syntax data alone cannot describe. Profiles are
//! immutable values passed explicitly to every component, so several
//! profiles can be used in one process without interfering.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::profile::{CaseStyle, TypeProfile};
//! use apigen_core::PrimitiveKind;
//!
//! let profile = TypeProfile::builtin("objc").unwrap();
//! assert_eq!(profile.field_case, CaseStyle::LowerCamel);
//! assert_eq!(profile.primitive(PrimitiveKind::String), Some("NSString *"));
//! ```

use apigen_core::{Error, PrimitiveKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const OBJC_PROFILE: &str = include_str!("../profiles/objc.toml");
const JAVASCRIPT_PROFILE: &str = include_str!("../profiles/javascript.toml");

/// Names and TOML sources of the profiles embedded in the crate.
pub const BUILTIN_PROFILES: &[(&str, &str)] =
    &[("objc", OBJC_PROFILE), ("javascript", JAVASCRIPT_PROFILE)];

/// Target syntax family rendering a profile's artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    /// Objective-C headers and XCTest cases
    Objc,
    /// A JavaScript routes module and node test file
    Javascript,
}

/// Identifier casing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    /// `listFolderArg`
    #[default]
    LowerCamel,
    /// `ListFolderArg`
    UpperCamel,
    /// `list_folder_arg`
    Snake,
}

/// Per-ecosystem configuration consumed by the formatter, mapper and
/// dialects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeProfile {
    /// Profile name
    pub name: String,
    /// Syntax family
    pub dialect: DialectKind,
    /// Prefix of every user-defined type identifier
    pub type_prefix: String,
    /// Separator between the namespace and type identifiers
    pub type_separator: String,
    /// Appended to class names to form a reference type expression
    pub reference_suffix: String,
    /// Container spelling; `{element}` is replaced by the element expression
    pub list_template: String,
    /// Serializer reference for lists
    pub list_serializer: String,
    /// Serializer reference for user-defined types; `{class}` is replaced
    /// by the class name
    pub serializer_template: String,
    /// Appended to nullable type expressions in annotations
    pub nullable_marker: String,
    /// Appended to non-nullable, non-void type expressions in annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonnull_marker: Option<String>,
    /// Whether nullable list elements carry the nullable marker
    pub annotate_list_elements: bool,
    /// Casing of field and variable identifiers
    pub field_case: CaseStyle,
    /// Appended to identifiers colliding with a reserved word
    pub escape_suffix: String,
    /// Injected in front of identifiers starting with a reserved prefix
    pub prefix_lead_word: String,
    /// Format string handed to timestamp literal builders
    pub timestamp_format: String,
    /// Spaces per indentation level
    pub indent: usize,
    /// Column at which documentation text wraps
    pub wrap_width: usize,
    /// Words no identifier may equal, compared case-insensitively
    pub reserved_words: Vec<String>,
    /// Prefixes no identifier may start with, compared case-insensitively
    pub reserved_prefixes: Vec<String>,
    /// Primitive spellings keyed by kind (`boolean`, `uint64`, ...)
    pub primitives: BTreeMap<String, String>,
    /// Serializer references keyed by kind
    #[serde(default)]
    pub serializers: BTreeMap<String, String>,
}

impl TypeProfile {
    /// Loads a built-in profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProfileError`] if no built-in profile has that name.
    pub fn builtin(name: &str) -> Result<Self> {
        let source = Self::builtin_source(name).ok_or_else(|| Error::ProfileError {
            profile: name.to_string(),
            message: format!(
                "unknown built-in profile (available: {})",
                Self::builtin_names().collect::<Vec<_>>().join(", ")
            ),
        })?;
        Self::from_toml(name, source)
    }

    /// Returns the TOML source of a built-in profile.
    #[must_use]
    pub fn builtin_source(name: &str) -> Option<&'static str> {
        BUILTIN_PROFILES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, source)| *source)
    }

    /// Names of the built-in profiles.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_PROFILES.iter().map(|(name, _)| *name)
    }

    /// Parses and validates a profile document.
    ///
    /// `origin` names the profile in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProfileError`] if the document is not valid TOML,
    /// does not match the schema, or fails [`TypeProfile::validate`].
    pub fn from_toml(origin: &str, source: &str) -> Result<Self> {
        let profile: Self = toml::from_str(source).map_err(|e| Error::ProfileError {
            profile: origin.to_string(),
            message: e.to_string(),
        })?;
        profile.validate()?;
        Ok(profile)
    }

    /// Checks the invariants the formatter and mapper rely on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProfileError`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| {
            Err(Error::ProfileError {
                profile: self.name.clone(),
                message,
            })
        };

        if !self.list_template.contains("{element}") {
            return fail("list_template must contain {element}".to_string());
        }
        if !self.serializer_template.contains("{class}") {
            return fail("serializer_template must contain {class}".to_string());
        }
        if self.escape_suffix.is_empty() {
            return fail("escape_suffix must not be empty".to_string());
        }
        if self.prefix_lead_word.is_empty() {
            return fail("prefix_lead_word must not be empty".to_string());
        }
        let lead = self.prefix_lead_word.to_lowercase();
        if let Some(prefix) = self
            .reserved_prefixes
            .iter()
            .find(|prefix| lead.starts_with(&prefix.to_lowercase()))
        {
            return fail(format!(
                "prefix_lead_word '{}' starts with reserved prefix '{prefix}'",
                self.prefix_lead_word
            ));
        }
        if self.wrap_width == 0 {
            return fail("wrap_width must be positive".to_string());
        }
        for (table, keys) in [("primitives", &self.primitives), ("serializers", &self.serializers)] {
            if let Some(key) = keys.keys().find(|key| PrimitiveKind::from_key(key).is_none()) {
                return fail(format!("unknown primitive kind '{key}' in [{table}]"));
            }
        }
        Ok(())
    }

    /// Spelling of a primitive kind, if the profile maps it.
    #[must_use]
    pub fn primitive(&self, kind: PrimitiveKind) -> Option<&str> {
        self.primitives.get(kind.key()).map(String::as_str)
    }

    /// Serializer reference of a primitive kind, if the profile maps it.
    #[must_use]
    pub fn serializer(&self, kind: PrimitiveKind) -> Option<&str> {
        self.serializers.get(kind.key()).map(String::as_str)
    }

    /// Primitive kinds without a spelling in this profile.
    #[must_use]
    pub fn missing_primitives(&self) -> Vec<PrimitiveKind> {
        PrimitiveKind::ALL
            .into_iter()
            .filter(|kind| self.primitive(*kind).is_none())
            .collect()
    }

    /// Whether `word` collides with a reserved word.
    #[must_use]
    pub fn is_reserved_word(&self, word: &str) -> bool {
        self.reserved_words
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(word))
    }

    /// Returns the reserved prefix `word` starts with, if any.
    #[must_use]
    pub fn reserved_prefix_of(&self, word: &str) -> Option<&str> {
        let lower = word.to_lowercase();
        self.reserved_prefixes
            .iter()
            .find(|prefix| lower.starts_with(&prefix.to_lowercase()))
            .map(String::as_str)
    }
}

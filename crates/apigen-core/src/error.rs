//! Error types for apigen.
//!
//! Errors fall into three families:
//!
//! - **Configuration errors**: an operator-supplied input (extra-argument
//!   rule, type profile, model file) is malformed. Detected before any
//!   artifact is produced.
//! - **Model-consistency errors**: the API model violates an invariant the
//!   upstream validator is supposed to guarantee (missing example value,
//!   unknown discriminant tag, literal of the wrong kind). These abort the
//!   generation run.
//! - **Template errors**: a built-in artifact preamble failed to render.
//!
//! # Examples
//!
//! ```
//! use apigen_core::{Error, Result};
//!
//! fn check_rule(raw: &str) -> Result<()> {
//!     if raw.is_empty() {
//!         return Err(Error::ConfigError {
//!             entry: raw.to_string(),
//!             message: "No match key".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_rule("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for apigen.
///
/// All library crates in the workspace report failures through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed extra-argument rule.
    ///
    /// Raised while validating operator-supplied route argument rules,
    /// before generation begins. The offending raw entry is kept verbatim.
    #[error("Invalid --extra-arg:{message}: {entry}")]
    ConfigError {
        /// The raw configuration entry as supplied by the operator
        entry: String,
        /// What is wrong with the entry
        message: String,
    },

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Type profile could not be loaded.
    #[error("Invalid type profile '{profile}': {message}")]
    ProfileError {
        /// Profile name or path
        profile: String,
        /// Description of the problem
        message: String,
    },

    /// The API model document could not be decoded.
    #[error("Invalid API model: {message}")]
    ModelError {
        /// Description of the decoding failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A user-defined type reference names no data type in the model.
    #[error("Unresolved type reference {namespace}.{name}")]
    UnresolvedType {
        /// Namespace of the reference
        namespace: String,
        /// Data type name of the reference
        name: String,
    },

    /// A non-void field has neither an example value nor a default.
    #[error(
        "Example '{example}' of {namespace}.{data_type} has no value for field '{field}' and the field has no default"
    )]
    MissingExampleValue {
        /// Namespace owning the struct
        namespace: String,
        /// Struct whose field is missing
        data_type: String,
        /// Example being synthesized
        example: String,
        /// The missing field
        field: String,
    },

    /// An example of an enumerated-subtype struct carries no `.tag` key.
    #[error("Example '{example}' of {namespace}.{data_type} does not select a subtype")]
    MissingSubtypeTag {
        /// Namespace owning the struct
        namespace: String,
        /// The polymorphic base struct
        data_type: String,
        /// Example being synthesized
        example: String,
    },

    /// A discriminant tag matches no subtype of an enumerated-subtype struct.
    #[error("{namespace}.{data_type} has no subtype with tag '{tag}'")]
    UnknownSubtypeTag {
        /// Namespace owning the struct
        namespace: String,
        /// The polymorphic base struct
        data_type: String,
        /// The unmatched tag
        tag: String,
    },

    /// A union selection names no variant of the union.
    #[error("{namespace}.{data_type} has no variant '{tag}'")]
    UnknownVariant {
        /// Namespace owning the union
        namespace: String,
        /// The union
        data_type: String,
        /// The unmatched tag
        tag: String,
    },

    /// An example or default literal contradicts its declared type.
    #[error("Invalid value in {context}: expected {expected}, found {found}")]
    InvalidExampleValue {
        /// Where the literal was found (example / field path)
        context: String,
        /// What the declared type requires
        expected: String,
        /// What the literal actually is
        found: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
    },
}

impl Error {
    /// Returns `true` if this error was caused by operator-supplied input.
    ///
    /// Argument, configuration, profile and model-decoding errors are all
    /// detected before generation begins.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::Error;
    ///
    /// let err = Error::ProfileError {
    ///     profile: "kotlin".to_string(),
    ///     message: "unknown profile".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError { .. }
                | Self::InvalidArgument(_)
                | Self::ProfileError { .. }
                | Self::ModelError { .. }
        )
    }

    /// Returns `true` if the API model violates a consistency invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::Error;
    ///
    /// let err = Error::UnknownSubtypeTag {
    ///     namespace: "files".to_string(),
    ///     data_type: "Metadata".to_string(),
    ///     tag: "symlink".to_string(),
    /// };
    /// assert!(err.is_model_error());
    /// assert!(!err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_model_error(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedType { .. }
                | Self::MissingExampleValue { .. }
                | Self::MissingSubtypeTag { .. }
                | Self::UnknownSubtypeTag { .. }
                | Self::UnknownVariant { .. }
                | Self::InvalidExampleValue { .. }
        )
    }
}

/// Result type alias for apigen operations.
///
/// # Examples
///
/// ```
/// use apigen_core::{Error, Result};
///
/// fn parse_width(value: i64) -> Result<usize> {
///     usize::try_from(value).map_err(|_| Error::ProfileError {
///         profile: "custom".to_string(),
///         message: "wrap_width must be positive".to_string(),
///     })
/// }
///
/// assert!(parse_width(80).is_ok());
/// assert!(parse_width(-1).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

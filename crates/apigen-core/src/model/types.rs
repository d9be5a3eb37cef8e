//! Abstract (ecosystem-independent) type references.
//!
//! [`AbstractType`] is a closed tagged union. Code that maps types to a
//! target ecosystem matches on [`Terminal`] after peeling aliases and
//! nullable wrappers with [`AbstractType::unwrap_type`], so adding a new
//! variant is a compile-time obligation for every mapper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in primitive kinds of the interface description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// `true` / `false`
    Boolean,
    /// Opaque binary payload
    Bytes,
    /// 32-bit IEEE float
    Float32,
    /// 64-bit IEEE float
    Float64,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 32-bit integer
    #[serde(rename = "uint32")]
    UInt32,
    /// Unsigned 64-bit integer
    #[serde(rename = "uint64")]
    UInt64,
    /// Unicode text
    String,
    /// Point in time, rendered through the profile's timestamp format
    Timestamp,
    /// No value
    Void,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Boolean,
        Self::Bytes,
        Self::Float32,
        Self::Float64,
        Self::Int32,
        Self::Int64,
        Self::UInt32,
        Self::UInt64,
        Self::String,
        Self::Timestamp,
        Self::Void,
    ];

    /// Returns the IDL spelling of the kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::PrimitiveKind;
    ///
    /// assert_eq!(PrimitiveKind::UInt64.name(), "UInt64");
    /// assert_eq!(PrimitiveKind::Timestamp.name(), "Timestamp");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Bytes => "Bytes",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::String => "String",
            Self::Timestamp => "Timestamp",
            Self::Void => "Void",
        }
    }

    /// Returns the lowercase key used for the kind in model and profile
    /// documents.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Bytes => "bytes",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::String => "string",
            Self::Timestamp => "timestamp",
            Self::Void => "void",
        }
    }

    /// Parses a document key back into a kind.
    ///
    /// ```
    /// use apigen_core::PrimitiveKind;
    ///
    /// assert_eq!(PrimitiveKind::from_key("int64"), Some(PrimitiveKind::Int64));
    /// assert_eq!(PrimitiveKind::from_key("decimal"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Returns `true` for integer kinds.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::Int64 | Self::UInt32 | Self::UInt64
        )
    }

    /// Returns `true` for integer and floating point kinds.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, Self::Float32 | Self::Float64)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to a user-defined data type by namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Owning namespace
    pub namespace: String,
    /// Data type name within the namespace
    pub name: String,
}

impl TypeRef {
    /// Creates a new reference.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Ecosystem-independent type of a field, argument or result.
///
/// The JSON form is internally tagged on `"type"`:
///
/// ```
/// use apigen_core::{AbstractType, PrimitiveKind};
///
/// let ty: AbstractType = serde_json::from_str(
///     r#"{"type": "list", "element": {"type": "primitive", "kind": "string"}}"#,
/// ).unwrap();
/// assert_eq!(ty, AbstractType::list(AbstractType::primitive(PrimitiveKind::String)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AbstractType {
    /// A built-in primitive.
    Primitive {
        /// The primitive kind
        kind: PrimitiveKind,
    },
    /// Homogeneous sequence.
    List {
        /// Element type; may itself be nullable
        element: Box<AbstractType>,
    },
    /// A struct or union declared in some namespace.
    UserDefined(TypeRef),
    /// A named alias of another type.
    Alias {
        /// Namespace declaring the alias
        namespace: String,
        /// Alias name
        name: String,
        /// Aliased type
        target: Box<AbstractType>,
    },
    /// Wraps a type whose values may be absent.
    Nullable {
        /// The non-nullable type
        inner: Box<AbstractType>,
    },
}

/// The innermost shape of a type once aliases and nullability are peeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Terminal<'a> {
    /// A primitive kind
    Primitive(PrimitiveKind),
    /// A list; the payload is the (possibly nullable) element type
    List(&'a AbstractType),
    /// A struct or union reference
    UserDefined(&'a TypeRef),
}

/// Result of [`AbstractType::unwrap_type`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unwrapped<'a> {
    /// The terminal shape
    pub terminal: Terminal<'a>,
    /// Whether any layer was a nullable wrapper
    pub nullable: bool,
    /// Namespace and name of the outermost alias, if the type was reached
    /// through one
    pub alias: Option<(&'a str, &'a str)>,
}

impl AbstractType {
    /// Creates a primitive type.
    #[must_use]
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive { kind }
    }

    /// Shorthand for `String`.
    #[must_use]
    pub const fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    /// Shorthand for `Void`.
    #[must_use]
    pub const fn void() -> Self {
        Self::primitive(PrimitiveKind::Void)
    }

    /// Creates a list of `element`.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    /// Creates a reference to a user-defined type.
    pub fn user_defined(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UserDefined(TypeRef::new(namespace, name))
    }

    /// Creates an alias named `name` for `target`.
    pub fn alias(namespace: impl Into<String>, name: impl Into<String>, target: Self) -> Self {
        Self::Alias {
            namespace: namespace.into(),
            name: name.into(),
            target: Box::new(target),
        }
    }

    /// Wraps the type as nullable.
    ///
    /// Nullability wraps at most once: wrapping an already nullable type
    /// returns it unchanged.
    ///
    /// ```
    /// use apigen_core::AbstractType;
    ///
    /// let once = AbstractType::string().nullable();
    /// assert_eq!(once.clone().nullable(), once);
    /// ```
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            Self::Nullable { .. } => self,
            other => Self::Nullable {
                inner: Box::new(other),
            },
        }
    }

    /// Peels aliases and nullable wrappers down to the terminal shape.
    ///
    /// Aliases are unwrapped transitively; the outermost alias name is kept
    /// for documentation.
    #[must_use]
    pub fn unwrap_type(&self) -> Unwrapped<'_> {
        let mut current = self;
        let mut nullable = false;
        let mut alias = None;
        loop {
            match current {
                Self::Nullable { inner } => {
                    nullable = true;
                    current = inner;
                }
                Self::Alias {
                    namespace,
                    name,
                    target,
                } => {
                    alias.get_or_insert((namespace.as_str(), name.as_str()));
                    current = target;
                }
                Self::Primitive { kind } => {
                    return Unwrapped {
                        terminal: Terminal::Primitive(*kind),
                        nullable,
                        alias,
                    };
                }
                Self::List { element } => {
                    return Unwrapped {
                        terminal: Terminal::List(element),
                        nullable,
                        alias,
                    };
                }
                Self::UserDefined(type_ref) => {
                    return Unwrapped {
                        terminal: Terminal::UserDefined(type_ref),
                        nullable,
                        alias,
                    };
                }
            }
        }
    }

    /// Returns `true` if the type, through any aliases, is nullable.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.unwrap_type().nullable
    }

    /// Returns `true` if the type, through any aliases, is `Void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(
            self.unwrap_type().terminal,
            Terminal::Primitive(PrimitiveKind::Void)
        )
    }
}

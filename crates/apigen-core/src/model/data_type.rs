//! Data types, fields and routes of a namespace.

use super::example::{Example, ExampleValue};
use super::types::{AbstractType, TypeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A struct or union field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Wire name of the field
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub data_type: AbstractType,
    /// Documentation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Statically known default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ExampleValue>,
}

impl Field {
    /// Creates an undocumented field without default.
    pub fn new(name: impl Into<String>, data_type: AbstractType) -> Self {
        Self {
            name: name.into(),
            data_type,
            doc: None,
            default: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<ExampleValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Whether the declared type is nullable.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.data_type.is_nullable()
    }

    /// Whether the field declares a default.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// A member of an enumerated-subtype set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtype {
    /// Discriminant tag selecting this subtype
    pub tag: String,
    /// The subtype struct
    #[serde(rename = "type")]
    pub data_type: TypeRef,
}

/// A record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    /// Type name
    pub name: String,
    /// Owning namespace; filled in when the model is linked
    #[serde(default)]
    pub namespace: String,
    /// Documentation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Struct this one extends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TypeRef>,
    /// Fields declared directly on this struct
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Closed set of subtypes, when this struct is a polymorphic base
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<Subtype>>,
    /// Examples by name
    #[serde(default)]
    pub examples: IndexMap<String, Example>,
}

impl Struct {
    /// Creates an empty struct.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            doc: None,
            parent: None,
            fields: Vec::new(),
            subtypes: None,
            examples: IndexMap::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the parent struct.
    #[must_use]
    pub fn with_parent(mut self, parent: TypeRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Adds an enumerated subtype.
    #[must_use]
    pub fn with_subtype(mut self, tag: impl Into<String>, data_type: TypeRef) -> Self {
        self.subtypes.get_or_insert_with(Vec::new).push(Subtype {
            tag: tag.into(),
            data_type,
        });
        self
    }

    /// Adds a named example.
    #[must_use]
    pub fn with_example(mut self, name: impl Into<String>, example: Example) -> Self {
        self.examples.insert(name.into(), example);
        self
    }

    /// Whether this struct is a closed polymorphic base.
    #[must_use]
    pub fn has_enumerated_subtypes(&self) -> bool {
        self.subtypes.as_ref().is_some_and(|subtypes| !subtypes.is_empty())
    }

    /// Returns a reference to this struct.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(&self.namespace, &self.name)
    }
}

/// A member of a tagged union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant (tag) name
    pub name: String,
    /// Documentation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Associated value type; `None` for a void variant
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<AbstractType>,
}

impl Variant {
    /// Creates a void variant.
    pub fn void(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            data_type: None,
        }
    }

    /// Creates a variant carrying a value of `data_type`.
    pub fn valued(name: impl Into<String>, data_type: AbstractType) -> Self {
        Self {
            name: name.into(),
            doc: None,
            data_type: Some(data_type),
        }
    }

    /// The associated type, if it is not void.
    #[must_use]
    pub fn payload_type(&self) -> Option<&AbstractType> {
        self.data_type.as_ref().filter(|data_type| !data_type.is_void())
    }
}

/// A tagged union type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Union {
    /// Type name
    pub name: String,
    /// Owning namespace; filled in when the model is linked
    #[serde(default)]
    pub namespace: String,
    /// Documentation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Variants in declaration order
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Union {
    /// Creates a union without variants.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            doc: None,
            variants: Vec::new(),
        }
    }

    /// Appends a variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Finds a variant by tag.
    #[must_use]
    pub fn variant(&self, tag: &str) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.name == tag)
    }
}

/// A user-defined data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataType {
    /// Record type
    Struct(Struct),
    /// Tagged union
    Union(Union),
}

impl DataType {
    /// Type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Union(u) => &u.name,
        }
    }

    /// Owning namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            Self::Struct(s) => &s.namespace,
            Self::Union(u) => &u.namespace,
        }
    }

    /// Documentation text.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        match self {
            Self::Struct(s) => s.doc.as_deref(),
            Self::Union(u) => u.doc.as_deref(),
        }
    }

    /// Returns the struct, if this is one.
    #[must_use]
    pub const fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Struct(s) => Some(s),
            Self::Union(_) => None,
        }
    }

    /// Returns the union, if this is one.
    #[must_use]
    pub const fn as_union(&self) -> Option<&Union> {
        match self {
            Self::Union(u) => Some(u),
            Self::Struct(_) => None,
        }
    }

    fn set_namespace(&mut self, namespace: &str) {
        let slot = match self {
            Self::Struct(s) => &mut s.namespace,
            Self::Union(u) => &mut u.namespace,
        };
        namespace.clone_into(slot);
    }
}

impl From<Struct> for DataType {
    fn from(value: Struct) -> Self {
        Self::Struct(value)
    }
}

impl From<Union> for DataType {
    fn from(value: Union) -> Self {
        Self::Union(value)
    }
}

/// A remote procedure exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Route name
    pub name: String,
    /// Owning namespace; filled in when the model is linked
    #[serde(default)]
    pub namespace: String,
    /// Argument type
    pub arg: AbstractType,
    /// Result type
    pub result: AbstractType,
    /// Error type
    pub error: AbstractType,
    /// Route metadata such as host or auth mode
    #[serde(default)]
    pub attrs: IndexMap<String, String>,
    /// Documentation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Whether the route is deprecated
    #[serde(default)]
    pub deprecated: bool,
}

impl Route {
    /// Creates a route with void result and error.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, arg: AbstractType) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            arg,
            result: AbstractType::void(),
            error: AbstractType::void(),
            attrs: IndexMap::new(),
            doc: None,
            deprecated: false,
        }
    }

    /// Sets the result type.
    #[must_use]
    pub fn with_result(mut self, result: AbstractType) -> Self {
        self.result = result;
        self
    }

    /// Adds a route attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}

/// A named group of data types and routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    /// Namespace name
    pub name: String,
    /// Documentation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Data types in declaration order
    #[serde(default)]
    pub data_types: Vec<DataType>,
    /// Routes in declaration order
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl Namespace {
    /// Creates an empty namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            data_types: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Appends a data type.
    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<DataType>) -> Self {
        self.data_types.push(data_type.into());
        self
    }

    /// Appends a route.
    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Structs of the namespace in declaration order.
    pub fn structs(&self) -> impl Iterator<Item = &Struct> {
        self.data_types.iter().filter_map(DataType::as_struct)
    }

    /// Unions of the namespace in declaration order.
    pub fn unions(&self) -> impl Iterator<Item = &Union> {
        self.data_types.iter().filter_map(DataType::as_union)
    }

    /// Stamps the namespace name onto every owned data type and route.
    pub(crate) fn link(&mut self) {
        for data_type in &mut self.data_types {
            data_type.set_namespace(&self.name);
        }
        for route in &mut self.routes {
            self.name.clone_into(&mut route.namespace);
        }
    }
}

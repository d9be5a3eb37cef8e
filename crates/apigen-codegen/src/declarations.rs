//! Declaration descriptors.
//!
//! The emitter turns each namespace of the model into a dialect-neutral
//! [`NamespaceDecl`]: every name formatted, every type mapped, every doc
//! string resolved. Dialects only decide layout.
//!
//! Data types are ordered so that a parent struct always precedes its
//! subtypes within a namespace.

use crate::context::EmitContext;
use crate::extra_args::ExtraArg;
use crate::mapper::MappedType;
use apigen_core::{
    AbstractType, DataType, Field, Namespace, PrimitiveKind, Result, Route, Struct, Terminal,
    TypeRef, Union,
};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// A struct field or route parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Formatted identifier
    pub ident: String,
    /// Name on the wire
    pub wire_name: String,
    /// Target type
    pub mapped: MappedType,
    /// Whether the field has a default
    pub has_default: bool,
    /// Resolved documentation
    pub doc: Option<String>,
    /// Terminal primitive kind, when the field is a primitive
    pub primitive: Option<PrimitiveKind>,
}

impl PropertyDecl {
    /// Whether callers may omit the value.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.mapped.nullable || self.has_default
    }
}

/// A struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Name in the model
    pub name: String,
    /// Qualified class name
    pub class_name: String,
    /// Class name of the parent, when the struct extends another
    pub parent_class: Option<String>,
    /// Resolved documentation
    pub doc: Option<String>,
    /// Fields declared on the struct itself
    pub fields: Vec<PropertyDecl>,
    /// Every non-void field including inherited ones, in constructor order
    pub init_params: Vec<PropertyDecl>,
    /// Serializer reference
    pub serializer: String,
    /// Subtype tags and their class names, for polymorphic bases
    pub subtypes: Vec<(String, String)>,
}

/// A union variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDecl {
    /// Name on the wire
    pub wire_name: String,
    /// Identifier used for the payload accessor
    pub ident: String,
    /// Upper camel form used inside other identifiers
    pub selector: String,
    /// Resolved documentation
    pub doc: Option<String>,
    /// Payload type, `None` for void variants
    pub payload: Option<MappedType>,
}

/// A union declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDecl {
    /// Name in the model
    pub name: String,
    /// Qualified class name
    pub class_name: String,
    /// Resolved documentation
    pub doc: Option<String>,
    /// Variants in declaration order
    pub variants: Vec<VariantDecl>,
    /// Serializer reference
    pub serializer: String,
}

/// A struct or union declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataTypeDecl {
    /// Struct
    Struct(StructDecl),
    /// Union
    Union(UnionDecl),
}

impl DataTypeDecl {
    /// Qualified class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        match self {
            Self::Struct(decl) => &decl.class_name,
            Self::Union(decl) => &decl.class_name,
        }
    }
}

/// A route declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecl {
    /// Route name in the model
    pub name: String,
    /// Namespace name
    pub namespace: String,
    /// Namespace-qualified function name (`filesListFolder`)
    pub function: String,
    /// Method name within the namespace's route class (`listFolder`)
    pub method: String,
    /// Request path (`files/list_folder`)
    pub url: String,
    /// Resolved documentation
    pub doc: Option<String>,
    /// Whether the route is deprecated
    pub deprecated: bool,
    /// Argument type
    pub arg: MappedType,
    /// Fields of the argument struct, when the argument is a struct
    pub params: Vec<PropertyDecl>,
    /// Operator-supplied extra arguments, documented before the fields
    pub extra_args: Vec<ExtraArg>,
    /// Result type
    pub result: MappedType,
    /// Error type
    pub error: MappedType,
    /// Route attribute values passed positionally, `None` when unset
    pub positional: Vec<Option<String>>,
}

/// Everything declared by one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Namespace name in the model
    pub name: String,
    /// Upper camel form (`Files`)
    pub ident: String,
    /// Resolved documentation
    pub doc: Option<String>,
    /// Data types, parents first
    pub data_types: Vec<DataTypeDecl>,
    /// Routes in declaration order
    pub routes: Vec<RouteDecl>,
    /// Other namespaces referenced by this one's data types, sorted
    pub imports: Vec<String>,
}

impl NamespaceDecl {
    /// Struct declarations in emission order.
    pub fn structs(&self) -> impl Iterator<Item = &StructDecl> {
        self.data_types.iter().filter_map(|decl| match decl {
            DataTypeDecl::Struct(decl) => Some(decl),
            DataTypeDecl::Union(_) => None,
        })
    }
}

/// Builds declaration descriptors for every namespace of the model.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationEmitter<'c, 'a> {
    ctx: &'c EmitContext<'a>,
}

impl<'c, 'a> DeclarationEmitter<'c, 'a> {
    /// Creates an emitter for a run.
    #[must_use]
    pub const fn new(ctx: &'c EmitContext<'a>) -> Self {
        Self { ctx }
    }

    /// Describes every namespace.
    ///
    /// # Errors
    ///
    /// Returns [`apigen_core::Error::UnresolvedType`] if a parent or route
    /// argument reference is dangling.
    pub fn build(&self) -> Result<Vec<NamespaceDecl>> {
        self.ctx
            .api
            .namespaces()
            .map(|namespace| self.namespace(namespace))
            .collect()
    }

    fn namespace(&self, namespace: &Namespace) -> Result<NamespaceDecl> {
        let names = self.ctx.names();
        let mut imports = BTreeSet::new();
        let mut data_types = Vec::with_capacity(namespace.data_types.len());

        for data_type in linearize(namespace) {
            collect_imports(data_type, &mut imports);
            data_types.push(match data_type {
                DataType::Struct(data_type) => DataTypeDecl::Struct(self.struct_decl(data_type)?),
                DataType::Union(data_type) => DataTypeDecl::Union(self.union_decl(data_type)),
            });
        }
        imports.remove(&namespace.name);

        let routes = namespace
            .routes
            .iter()
            .map(|route| self.route_decl(route))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            namespace = %namespace.name,
            data_types = data_types.len(),
            routes = routes.len(),
            "described namespace"
        );

        Ok(NamespaceDecl {
            name: namespace.name.clone(),
            ident: names.type_name(&namespace.name),
            doc: self.ctx.doc(namespace.doc.as_deref()),
            data_types,
            routes,
            imports: imports.into_iter().collect(),
        })
    }

    fn property(&self, field: &Field) -> PropertyDecl {
        let primitive = match field.data_type.unwrap_type().terminal {
            Terminal::Primitive(kind) => Some(kind),
            _ => None,
        };
        PropertyDecl {
            ident: self.ctx.names().field(&field.name),
            wire_name: field.name.clone(),
            mapped: self.ctx.mapper.resolve(&field.data_type),
            has_default: field.has_default(),
            doc: self.ctx.doc(field.doc.as_deref()),
            primitive,
        }
    }

    fn struct_decl(&self, data_type: &Struct) -> Result<StructDecl> {
        let mapper = &self.ctx.mapper;
        let class_name = mapper.struct_class(data_type);
        let init_params = self
            .ctx
            .api
            .all_fields(data_type)?
            .into_iter()
            .filter(|field| !field.data_type.is_void())
            .map(|field| self.property(field))
            .collect();
        let subtypes = data_type
            .subtypes
            .iter()
            .flatten()
            .map(|subtype| (subtype.tag.clone(), mapper.class_name(&subtype.data_type)))
            .collect();

        Ok(StructDecl {
            name: data_type.name.clone(),
            parent_class: data_type.parent.as_ref().map(|parent| mapper.class_name(parent)),
            doc: self.ctx.doc(data_type.doc.as_deref()),
            fields: data_type
                .fields
                .iter()
                .filter(|field| !field.data_type.is_void())
                .map(|field| self.property(field))
                .collect(),
            init_params,
            serializer: mapper.class_serializer(&class_name),
            subtypes,
            class_name,
        })
    }

    fn union_decl(&self, data_type: &Union) -> UnionDecl {
        let names = self.ctx.names();
        let mapper = &self.ctx.mapper;
        let class_name = mapper.class_name(&TypeRef::new(&data_type.namespace, &data_type.name));
        let variants = data_type
            .variants
            .iter()
            .map(|variant| VariantDecl {
                wire_name: variant.name.clone(),
                ident: names.field(&variant.name),
                selector: names.type_name(&variant.name),
                doc: self.ctx.doc(variant.doc.as_deref()),
                payload: variant.payload_type().map(|ty| mapper.resolve(ty)),
            })
            .collect();

        UnionDecl {
            name: data_type.name.clone(),
            doc: self.ctx.doc(data_type.doc.as_deref()),
            variants,
            serializer: mapper.class_serializer(&class_name),
            class_name,
        }
    }

    fn route_decl(&self, route: &Route) -> Result<RouteDecl> {
        let names = self.ctx.names();
        let api = self.ctx.api;

        let (params, extra_args) = match route.arg.unwrap_type().terminal {
            Terminal::UserDefined(type_ref) => {
                let params = match api.lookup(type_ref)? {
                    DataType::Struct(arg) => api
                        .all_fields(arg)?
                        .into_iter()
                        .filter(|field| !field.data_type.is_void())
                        .map(|field| self.property(field))
                        .collect(),
                    DataType::Union(_) => Vec::new(),
                };
                let extra_args = self
                    .ctx
                    .options
                    .extra_args
                    .matching(&route.attrs)
                    .cloned()
                    .collect();
                (params, extra_args)
            }
            _ => (Vec::new(), Vec::new()),
        };

        let positional = api
            .route_schema()
            .iter()
            .map(|attr| route.attrs.get(attr).cloned())
            .collect();

        Ok(RouteDecl {
            name: route.name.clone(),
            namespace: route.namespace.clone(),
            function: names.field(&format!("{}_{}", route.namespace, route.name)),
            method: names.field(&route.name),
            url: format!("{}/{}", route.namespace, route.name),
            doc: self.ctx.doc(route.doc.as_deref()),
            deprecated: route.deprecated,
            arg: self.ctx.mapper.resolve(&route.arg),
            params,
            extra_args,
            result: self.ctx.mapper.resolve(&route.result),
            error: self.ctx.mapper.resolve(&route.error),
            positional,
        })
    }
}

/// Orders a namespace's data types so that same-namespace parents come
/// before their subtypes, otherwise keeping declaration order.
fn linearize(namespace: &Namespace) -> Vec<&DataType> {
    fn visit<'n>(
        namespace: &'n Namespace,
        index: usize,
        placed: &mut HashSet<usize>,
        out: &mut Vec<&'n DataType>,
    ) {
        if !placed.insert(index) {
            return;
        }
        let data_type = &namespace.data_types[index];
        if let Some(parent) = data_type.as_struct().and_then(|s| s.parent.as_ref())
            && parent.namespace == namespace.name
            && let Some(parent_index) = namespace
                .data_types
                .iter()
                .position(|candidate| candidate.name() == parent.name)
        {
            visit(namespace, parent_index, placed, out);
        }
        out.push(data_type);
    }

    let mut placed = HashSet::new();
    let mut out = Vec::with_capacity(namespace.data_types.len());
    for index in 0..namespace.data_types.len() {
        visit(namespace, index, &mut placed, &mut out);
    }
    out
}

fn collect_imports(data_type: &DataType, imports: &mut BTreeSet<String>) {
    match data_type {
        DataType::Struct(data_type) => {
            if let Some(parent) = &data_type.parent {
                imports.insert(parent.namespace.clone());
            }
            for field in &data_type.fields {
                referenced_namespaces(&field.data_type, imports);
            }
        }
        DataType::Union(data_type) => {
            for ty in data_type.variants.iter().filter_map(|v| v.payload_type()) {
                referenced_namespaces(ty, imports);
            }
        }
    }
}

fn referenced_namespaces(ty: &AbstractType, out: &mut BTreeSet<String>) {
    match ty {
        AbstractType::Primitive { .. } => {}
        AbstractType::UserDefined(type_ref) => {
            out.insert(type_ref.namespace.clone());
        }
        AbstractType::List { element: inner }
        | AbstractType::Alias { target: inner, .. }
        | AbstractType::Nullable { inner } => referenced_namespaces(inner, out),
    }
}

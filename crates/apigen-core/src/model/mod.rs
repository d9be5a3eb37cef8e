//! The API model consumed by code generation.
//!
//! The model is produced upstream by the IDL parser and validator and is
//! read-only for the whole generation run. [`Api::from_json`] decodes the
//! parser's JSON output and links every data type and route to its
//! namespace so that lookups by [`TypeRef`] are constant time.
//!
//! # Examples
//!
//! ```
//! use apigen_core::model::Api;
//!
//! let api = Api::from_json(r#"{
//!     "namespaces": [{
//!         "name": "users",
//!         "data_types": [{"kind": "struct", "name": "Account", "fields": []}]
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(api.namespaces().count(), 1);
//! ```

mod data_type;
mod example;
mod types;

pub use data_type::{DataType, Field, Namespace, Route, Struct, Subtype, Union, Variant};
pub use example::{Example, ExampleObject, ExampleValue, TAG_KEY};
pub use types::{AbstractType, PrimitiveKind, Terminal, TypeRef, Unwrapped};

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Root of the API model.
#[derive(Debug, Clone)]
pub struct Api {
    namespaces: Vec<Namespace>,
    route_schema: Vec<String>,
    index: HashMap<TypeRef, (usize, usize)>,
}

#[derive(Deserialize)]
struct ApiDocument {
    namespaces: Vec<Namespace>,
    #[serde(default)]
    route_schema: Vec<String>,
}

impl Api {
    /// Builds a linked model from namespaces in declaration order.
    ///
    /// `route_schema` lists route attribute names whose values are passed
    /// positionally to the runtime request call.
    #[must_use]
    pub fn new(mut namespaces: Vec<Namespace>, route_schema: Vec<String>) -> Self {
        let mut index = HashMap::new();
        for (ns_idx, namespace) in namespaces.iter_mut().enumerate() {
            namespace.link();
            for (dt_idx, data_type) in namespace.data_types.iter().enumerate() {
                index.insert(
                    TypeRef::new(&namespace.name, data_type.name()),
                    (ns_idx, dt_idx),
                );
            }
        }
        Self {
            namespaces,
            route_schema,
            index,
        }
    }

    /// Decodes a model from the parser's JSON output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelError`] if the document is not a valid model.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ApiDocument = serde_json::from_str(json).map_err(|e| Error::ModelError {
            message: e.to_string(),
            source: Some(e),
        })?;
        Ok(Self::new(document.namespaces, document.route_schema))
    }

    /// Namespaces in declaration order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.iter()
    }

    /// Looks up a namespace by name.
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|namespace| namespace.name == name)
    }

    /// Route attribute names passed positionally to the request call.
    #[must_use]
    pub fn route_schema(&self) -> &[String] {
        &self.route_schema
    }

    /// Resolves a user-defined type reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedType`] if no data type has that name.
    pub fn lookup(&self, type_ref: &TypeRef) -> Result<&DataType> {
        self.index
            .get(type_ref)
            .map(|&(ns_idx, dt_idx)| &self.namespaces[ns_idx].data_types[dt_idx])
            .ok_or_else(|| Error::UnresolvedType {
                namespace: type_ref.namespace.clone(),
                name: type_ref.name.clone(),
            })
    }

    /// Resolves a reference that must name a struct.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedType`] if the reference is dangling or
    /// names a union.
    pub fn lookup_struct(&self, type_ref: &TypeRef) -> Result<&Struct> {
        self.lookup(type_ref)?
            .as_struct()
            .ok_or_else(|| Error::UnresolvedType {
                namespace: type_ref.namespace.clone(),
                name: type_ref.name.clone(),
            })
    }

    /// Returns every field of `data_type`: inherited fields first, in
    /// declaration order down the parent chain, then its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedType`] if a parent reference is dangling.
    pub fn all_fields<'a>(&'a self, data_type: &'a Struct) -> Result<Vec<&'a Field>> {
        let mut chain = vec![data_type];
        let mut current = data_type;
        while let Some(parent_ref) = &current.parent {
            let parent = self.lookup_struct(parent_ref)?;
            if chain.iter().any(|seen| std::ptr::eq(*seen, parent)) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        Ok(chain
            .iter()
            .rev()
            .flat_map(|s| s.fields.iter())
            .collect())
    }

    /// Finds the subtype of a polymorphic base selected by `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSubtypeTag`] if no subtype carries `tag`, and
    /// [`Error::UnresolvedType`] if the matching subtype reference is dangling.
    pub fn find_subtype<'a>(&'a self, base: &Struct, tag: &str) -> Result<&'a Struct> {
        let subtype = base
            .subtypes
            .iter()
            .flatten()
            .find(|subtype| subtype.tag == tag)
            .ok_or_else(|| Error::UnknownSubtypeTag {
                namespace: base.namespace.clone(),
                data_type: base.name.clone(),
                tag: tag.to_string(),
            })?;
        self.lookup_struct(&subtype.data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_api() -> Api {
        let metadata = Struct::new("files", "Metadata")
            .with_field(Field::new("name", AbstractType::string()))
            .with_subtype("file", TypeRef::new("files", "FileMetadata"))
            .with_subtype("folder", TypeRef::new("files", "FolderMetadata"));
        let file = Struct::new("files", "FileMetadata")
            .with_parent(TypeRef::new("files", "Metadata"))
            .with_field(Field::new("size", AbstractType::primitive(PrimitiveKind::UInt64)));
        let folder = Struct::new("files", "FolderMetadata")
            .with_parent(TypeRef::new("files", "Metadata"))
            .with_field(Field::new("id", AbstractType::string()));
        Api::new(
            vec![
                Namespace::new("files")
                    .with_data_type(metadata)
                    .with_data_type(file)
                    .with_data_type(folder),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_all_fields_puts_inherited_first() {
        let api = sample_api();
        let file = api
            .lookup_struct(&TypeRef::new("files", "FileMetadata"))
            .unwrap();
        let names: Vec<_> = api
            .all_fields(file)
            .unwrap()
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["name", "size"]);
    }

    #[test]
    fn test_find_subtype_by_tag() {
        let api = sample_api();
        let base = api.lookup_struct(&TypeRef::new("files", "Metadata")).unwrap();
        let folder = api.find_subtype(base, "folder").unwrap();
        assert_eq!(folder.name, "FolderMetadata");
    }

    #[test]
    fn test_find_subtype_unknown_tag_is_typed_failure() {
        let api = sample_api();
        let base = api.lookup_struct(&TypeRef::new("files", "Metadata")).unwrap();
        let err = api.find_subtype(base, "symlink").unwrap_err();
        assert!(matches!(err, Error::UnknownSubtypeTag { ref tag, .. } if tag == "symlink"));
    }

    #[test]
    fn test_lookup_dangling_reference() {
        let api = sample_api();
        let err = api.lookup(&TypeRef::new("files", "Nope")).unwrap_err();
        assert!(err.is_model_error());
    }

    #[test]
    fn test_from_json_links_namespaces() {
        let api = Api::from_json(
            r#"{"namespaces": [{"name": "users", "data_types": [
                {"kind": "union", "name": "Role", "variants": [{"name": "admin"}]}
            ], "routes": [{"name": "get_role",
                "arg": {"type": "primitive", "kind": "void"},
                "result": {"type": "user_defined", "namespace": "users", "name": "Role"},
                "error": {"type": "primitive", "kind": "void"},
                "attrs": {"host": "api"}}]}],
               "route_schema": ["host"]}"#,
        )
        .unwrap();
        let role = api.lookup(&TypeRef::new("users", "Role")).unwrap();
        assert_eq!(role.namespace(), "users");
        assert_eq!(api.route_schema(), ["host"]);
        let route = &api.namespace("users").unwrap().routes[0];
        assert_eq!(route.namespace, "users");
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let err = Api::from_json(r#"{"namespaces": 3}"#).unwrap_err();
        assert!(matches!(err, Error::ModelError { source: Some(_), .. }));
        assert!(err.is_config_error());
    }
}

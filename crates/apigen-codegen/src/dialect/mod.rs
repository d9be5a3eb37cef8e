//! Target syntax families.
//!
//! A profile describes everything about a target that is plain data. The
//! rest (literal syntax, constructor call shapes and the layout of each
//! artifact) lives behind the [`Dialect`] trait, with one implementation
//! per [`DialectKind`].

pub mod javascript;
pub mod objc;

use crate::context::EmitContext;
use crate::declarations::NamespaceDecl;
use crate::literal::FieldArgument;
use crate::profile::DialectKind;
use crate::roundtrip::TestSuite;
use crate::types::Artifact;
use apigen_core::Result;
use std::fmt;

pub use javascript::JavascriptDialect;
pub use objc::ObjcDialect;

/// Value carried by a union selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnionPayload {
    /// Void variant
    Void,
    /// Any non-struct value, already rendered
    Value(String),
    /// Struct-valued variant
    Struct {
        /// Class of the concrete struct
        class: String,
        /// Discriminant tag when the struct is a subtype of a polymorphic base
        tag: Option<String>,
        /// Constructor arguments in declared field order
        args: Vec<FieldArgument>,
    },
}

/// A union value to construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionSelection {
    /// Union class name
    pub class: String,
    /// Variant wire name
    pub tag: String,
    /// Variant name formatted for use inside identifiers (`Update`)
    pub selector: String,
    /// Associated value
    pub payload: UnionPayload,
}

/// Syntax of one target ecosystem.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Boolean literal.
    fn bool_literal(&self, value: bool) -> String;

    /// Numeric literal from a decimal numeral.
    fn number_literal(&self, numeral: &str) -> String;

    /// Quoted and escaped string literal.
    fn string_literal(&self, value: &str) -> String;

    /// The absent value.
    fn null_literal(&self) -> String;

    /// Timestamp built from its textual form, the profile's format and the
    /// timestamp serializer.
    fn timestamp_literal(&self, value: &str, format: &str, serializer: &str) -> String;

    /// Binary payload built from its textual form.
    fn bytes_literal(&self, value: &str) -> String;

    /// Sequence literal from rendered items.
    fn list_literal(&self, items: &[String]) -> String;

    /// Construction of a struct from arguments in declared field order.
    fn construct_struct(&self, class: &str, tag: Option<&str>, args: &[FieldArgument]) -> String;

    /// Construction of a union value.
    fn construct_union(&self, selection: &UnionSelection) -> String;

    /// Whether round-trip tests bind compound field values to locals before
    /// passing them to the constructor.
    fn binds_compound_arguments(&self) -> bool;

    /// Local names used by the round-trip test body itself.
    fn reserved_locals(&self) -> &'static [&'static str];

    /// Renders the declaration artifacts of every namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if a preamble template fails to render.
    fn declaration_artifacts(
        &self,
        ctx: &EmitContext<'_>,
        namespaces: &[NamespaceDecl],
    ) -> Result<Vec<Artifact>>;

    /// Renders the round-trip test artifacts.
    ///
    /// # Errors
    ///
    /// Returns an error if a preamble template fails to render.
    fn test_artifacts(&self, ctx: &EmitContext<'_>, suites: &[TestSuite]) -> Result<Vec<Artifact>>;
}

/// Returns the dialect implementing `kind`.
#[must_use]
pub fn for_kind(kind: DialectKind) -> &'static dyn Dialect {
    match kind {
        DialectKind::Objc => &ObjcDialect,
        DialectKind::Javascript => &JavascriptDialect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_kind_dispatch() {
        assert_eq!(for_kind(DialectKind::Objc).null_literal(), "nil");
        assert_eq!(for_kind(DialectKind::Javascript).null_literal(), "null");
    }
}

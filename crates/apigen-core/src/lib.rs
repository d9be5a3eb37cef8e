//! Core types and errors for apigen.
//!
//! This crate provides the foundational types shared by the generator and
//! the command-line front end.
//!
//! # Architecture
//!
//! The core consists of:
//! - The read-only API model (namespaces, data types, routes, examples)
//! - Error hierarchy with contextual information
//! - CLI value types (exit codes, output formats)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;

pub mod cli;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    AbstractType, Api, DataType, Example, ExampleObject, ExampleValue, Field, Namespace,
    PrimitiveKind, Route, Struct, Subtype, Terminal, TypeRef, Union, Unwrapped, Variant, TAG_KEY,
};

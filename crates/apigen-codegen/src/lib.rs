//! Multi-target code generation from an API model.
//!
//! Given a read-only [`apigen_core::Api`] and a [`TypeProfile`], the
//! generator emits declaration artifacts (data types, serializers, routes)
//! and round-trip serialization tests built from the model's examples.
//!
//! # Architecture
//!
//! - [`profile`]: per-ecosystem configuration loaded from TOML
//! - [`naming`] and [`mapper`]: identifiers and type expressions
//! - [`literal`]: example values rendered as target expressions
//! - [`declarations`] and [`roundtrip`]: dialect-neutral descriptors
//! - [`dialect`]: the syntax and layout of each target
//! - [`generator`]: the driver tying a run together

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod context;
pub mod declarations;
pub mod dialect;
pub mod docs;
pub mod extra_args;
pub mod generator;
pub mod literal;
pub mod mapper;
pub mod naming;
pub mod profile;
pub mod roundtrip;
pub mod template_engine;
pub mod types;
pub mod writer;

pub use extra_args::ExtraArgs;
pub use generator::{CodeGenerator, GeneratorOptions};
pub use profile::TypeProfile;
pub use types::{Artifact, GeneratedCode};

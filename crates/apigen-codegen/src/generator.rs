//! Generation driver.
//!
//! Runs the declaration and round-trip emitters for one profile over one
//! API model. Artifacts are produced entirely in memory; a failing example
//! or a dangling reference aborts the run before anything is returned.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::{CodeGenerator, GeneratorOptions, TypeProfile};
//! use apigen_core::{AbstractType, Api, Field, Namespace, Route, Struct};
//!
//! let api = Api::new(
//!     vec![Namespace::new("files")
//!         .with_data_type(
//!             Struct::new("files", "ListFolderArg")
//!                 .with_field(Field::new("path", AbstractType::string())),
//!         )
//!         .with_route(Route::new(
//!             "files",
//!             "list_folder",
//!             AbstractType::user_defined("files", "ListFolderArg"),
//!         ))],
//!     Vec::new(),
//! );
//!
//! let generator = CodeGenerator::new(
//!     TypeProfile::builtin("javascript").unwrap(),
//!     GeneratorOptions::default(),
//! )
//! .unwrap();
//! let code = generator.generate(&api).unwrap();
//!
//! let routes = code.artifact("routes.js").unwrap().contents();
//! assert!(routes.contains("routes.filesListFolder = function (arg) {"));
//! ```

use crate::context::EmitContext;
use crate::declarations::DeclarationEmitter;
use crate::dialect;
use crate::docs::{DocRefResolver, PassThrough};
use crate::extra_args::ExtraArgs;
use crate::mapper::TypeMapper;
use crate::profile::TypeProfile;
use crate::roundtrip::RoundTripEmitter;
use crate::template_engine::TemplateEngine;
use crate::types::GeneratedCode;
use apigen_core::{Api, Result};

/// Per-run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Name of the JavaScript routes module (default `routes.js`)
    pub routes_filename: Option<String>,
    /// Class the JavaScript route functions are documented as members of
    pub class_name: Option<String>,
    /// Extra route arguments to document
    pub extra_args: ExtraArgs,
    /// Whether to emit declaration artifacts
    pub emit_declarations: bool,
    /// Whether to emit round-trip test artifacts
    pub emit_tests: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            routes_filename: None,
            class_name: None,
            extra_args: ExtraArgs::default(),
            emit_declarations: true,
            emit_tests: true,
        }
    }
}

/// Code generator for one target profile.
#[derive(Debug)]
pub struct CodeGenerator {
    profile: TypeProfile,
    options: GeneratorOptions,
    engine: TemplateEngine<'static>,
    resolver: Box<dyn DocRefResolver>,
}

impl CodeGenerator {
    /// Creates a generator. Documentation references are replaced by their
    /// bare value unless another resolver is installed.
    ///
    /// # Errors
    ///
    /// Returns [`apigen_core::Error::ProfileError`] if the profile is
    /// inconsistent, or a template error if the built-in templates fail to
    /// register.
    pub fn new(profile: TypeProfile, options: GeneratorOptions) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            profile,
            options,
            engine: TemplateEngine::new()?,
            resolver: Box::new(PassThrough),
        })
    }

    /// Replaces the documentation reference resolver.
    #[must_use]
    pub fn with_doc_resolver(mut self, resolver: impl DocRefResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// The active profile.
    #[must_use]
    pub const fn profile(&self) -> &TypeProfile {
        &self.profile
    }

    /// The run options.
    #[must_use]
    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates every artifact for `api`.
    ///
    /// Output is a pure function of the model, the profile and the options:
    /// two runs over the same inputs produce identical artifacts.
    ///
    /// # Errors
    ///
    /// Returns the first model or example error encountered. No artifacts
    /// are returned on failure.
    pub fn generate(&self, api: &Api) -> Result<GeneratedCode> {
        let profile = &self.profile;
        tracing::info!(
            "Generating {} code for {} namespaces",
            profile.name,
            api.namespaces().count()
        );

        for kind in profile.missing_primitives() {
            tracing::warn!(
                "Profile '{}' does not map primitive kind '{}', falling back to its name",
                profile.name,
                kind.key()
            );
        }

        let ctx = EmitContext {
            api,
            profile,
            mapper: TypeMapper::new(profile),
            dialect: dialect::for_kind(profile.dialect),
            engine: &self.engine,
            resolver: self.resolver.as_ref(),
            options: &self.options,
        };

        let mut code = GeneratedCode::new();

        if self.options.emit_declarations {
            let namespaces = DeclarationEmitter::new(&ctx).build()?;
            let artifacts = ctx.dialect.declaration_artifacts(&ctx, &namespaces)?;
            for artifact in &artifacts {
                tracing::debug!("Generated {} ({} lines)", artifact.name, artifact.line_count());
            }
            code.extend(artifacts);
        }

        if self.options.emit_tests {
            let suites = RoundTripEmitter::new(&ctx).build()?;
            let cases: usize = suites.iter().map(|suite| suite.cases.len()).sum();
            let artifacts = ctx.dialect.test_artifacts(&ctx, &suites)?;
            for artifact in &artifacts {
                tracing::debug!("Generated {} ({cases} round-trip tests)", artifact.name);
            }
            code.extend(artifacts);
        }

        tracing::info!(
            "Successfully generated {} artifacts with profile {}",
            code.artifact_count(),
            profile.name
        );

        Ok(code)
    }
}

//! Shared state of one generation run.

use crate::dialect::Dialect;
use crate::docs::{process_doc, DocRefResolver};
use crate::generator::GeneratorOptions;
use crate::literal::LiteralSynthesizer;
use crate::mapper::TypeMapper;
use crate::naming::IdentifierFormatter;
use crate::profile::TypeProfile;
use crate::template_engine::TemplateEngine;
use crate::writer::CodeWriter;
use apigen_core::{Api, Result};
use serde::Serialize;

/// Everything an emitter needs, borrowed for the duration of a run.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// The API being generated
    pub api: &'a Api,
    /// Active target profile
    pub profile: &'a TypeProfile,
    /// Type mapper bound to the profile
    pub mapper: TypeMapper<'a>,
    /// Syntax of the profile's dialect
    pub dialect: &'static dyn Dialect,
    /// Preamble templates
    pub engine: &'a TemplateEngine<'static>,
    /// Documentation reference resolver
    pub resolver: &'a dyn DocRefResolver,
    /// Run options
    pub options: &'a GeneratorOptions,
}

impl<'a> EmitContext<'a> {
    /// Identifier formatter bound to the profile.
    #[must_use]
    pub const fn names(&self) -> &IdentifierFormatter<'a> {
        self.mapper.names()
    }

    /// Literal synthesizer for this run.
    #[must_use]
    pub const fn synthesizer(&self) -> LiteralSynthesizer<'a> {
        LiteralSynthesizer::new(self.api, self.mapper, self.dialect)
    }

    /// A fresh writer using the profile's layout.
    #[must_use]
    pub const fn writer(&self) -> CodeWriter {
        CodeWriter::new(self.profile.indent, self.profile.wrap_width)
    }

    /// Documentation with references resolved. Blank documentation is
    /// treated as absent.
    #[must_use]
    pub fn doc(&self, doc: Option<&str>) -> Option<String> {
        doc.map(|text| process_doc(text.trim(), self.resolver))
            .filter(|text| !text.trim().is_empty())
    }

    /// Renders a preamble template.
    ///
    /// # Errors
    ///
    /// Returns the engine's template error.
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.engine.render(template, data)
    }
}

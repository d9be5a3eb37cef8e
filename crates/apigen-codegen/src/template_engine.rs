//! Template engine for artifact preambles using Handlebars.
//!
//! The fixed parts of every artifact (banner comment, imports, test
//! harness boilerplate) live in templates compiled into the binary. The
//! repetitive bodies are produced by the dialects with a
//! [`CodeWriter`](crate::writer::CodeWriter).
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let preamble = engine.render("javascript/routes", &json!({})).unwrap();
//! assert!(preamble.contains("var routes = {};"));
//! ```

use apigen_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "objc/objects_header",
        include_str!("../templates/objc/objects_header.hbs"),
    ),
    (
        "objc/routes_header",
        include_str!("../templates/objc/routes_header.hbs"),
    ),
    ("objc/tests", include_str!("../templates/objc/tests.hbs")),
    (
        "javascript/routes",
        include_str!("../templates/javascript/routes.hbs"),
    ),
    (
        "javascript/tests",
        include_str!("../templates/javascript/tests.hbs"),
    ),
];

/// Template engine for artifact preambles.
///
/// Wraps Handlebars in strict mode, so a template referring to a missing
/// variable fails instead of rendering an empty string. Output is source
/// code, so HTML escaping is disabled.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in BUILTIN_TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    message: format!("Failed to register template '{name}': {e}"),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is not registered,
    /// the context cannot be serialized or a referenced variable is missing.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Template rendering failed: {e}"),
            })
    }

    /// Registers a custom template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register_template_string("custom", "// {{name}}").unwrap();
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }

    /// Names of the registered templates.
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.handlebars.get_templates().keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_engine_creation() {
        let engine = TemplateEngine::new().unwrap();
        let mut names: Vec<_> = engine.template_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            [
                "javascript/routes",
                "javascript/tests",
                "objc/objects_header",
                "objc/routes_header",
                "objc/tests",
            ]
        );
    }

    #[test]
    fn test_render_objects_header() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                "objc/objects_header",
                &json!({
                    "namespace": "files",
                    "prefix": "Dbx",
                    "imports": ["DbxCommonObjects.h"],
                    "classes": ["DbxFilesMetadata", "DbxFilesWriteMode"],
                }),
            )
            .unwrap();
        assert!(rendered.contains("Auto-generated by apigen"));
        assert!(rendered.contains("#import \"DbxCommonObjects.h\""));
        assert!(rendered.contains("@class DbxFilesWriteMode;"));
        assert!(rendered.contains("NS_ASSUME_NONNULL_BEGIN"));
    }

    #[test]
    fn test_strict_mode_rejects_missing_variable() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("objc/routes_header", &json!({})).unwrap_err();
        assert!(matches!(err, Error::TemplateError { .. }));
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.register_template_string("raw", "{{value}}").unwrap();
        let rendered = engine.render("raw", &json!({"value": "<a & 'b'>"})).unwrap();
        assert_eq!(rendered, "<a & 'b'>");
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.render("nope", &json!({})).is_err());
    }
}

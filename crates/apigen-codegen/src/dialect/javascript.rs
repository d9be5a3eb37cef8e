//! JavaScript: plain object literals, a JSDoc-annotated routes module and a
//! `node:test` round-trip suite.

use super::{Dialect, UnionPayload, UnionSelection};
use crate::context::EmitContext;
use crate::declarations::{NamespaceDecl, RouteDecl};
use crate::literal::FieldArgument;
use crate::roundtrip::TestSuite;
use crate::types::Artifact;
use crate::writer::CodeWriter;
use apigen_core::{Result, TAG_KEY};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Routes module name used when the run does not name one.
pub const DEFAULT_ROUTES_FILENAME: &str = "routes.js";

/// Round-trip test module name.
pub const TESTS_FILENAME: &str = "serialization.test.js";

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"));

/// JavaScript dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavascriptDialect;

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            c if c.is_control() && c.is_ascii() => {
                quoted.push_str(&format!("\\x{:02x}", u32::from(c)));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Property key, bare when it is a valid identifier.
fn key(name: &str) -> String {
    if IDENTIFIER_REGEX.is_match(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn object(entries: &[(String, String)]) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    let body = entries
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

fn tagged(tag: &str) -> (String, String) {
    (quote(TAG_KEY), quote(tag))
}

fn field_entries(args: &[FieldArgument]) -> impl Iterator<Item = (String, String)> + '_ {
    args.iter()
        .map(|arg| (key(&arg.wire_name), arg.literal.expression.clone()))
}

impl JavascriptDialect {
    fn route_function(ctx: &EmitContext<'_>, w: &mut CodeWriter, route: &RouteDecl) {
        let profile = ctx.profile;
        w.line("/**");
        if let Some(doc) = &route.doc {
            w.wrapped(doc, " * ");
        }
        if let Some(class_name) = &ctx.options.class_name {
            w.line(format!(" * @function {class_name}#{}", route.function));
        }
        if route.deprecated {
            w.line(" * @deprecated");
        }
        if !route.arg.void {
            w.wrapped(
                &format!("@arg {{{}}} arg - The request parameters.", route.arg.documented()),
                " * ",
            );
            for extra in &route.extra_args {
                let text = match &extra.doc {
                    Some(doc) => format!("@arg {{{}}} arg.{} - {doc}", extra.arg_type, extra.name),
                    None => format!("@arg {{{}}} arg.{}", extra.arg_type, extra.name),
                };
                w.wrapped(&text, " * ");
            }
            for param in &route.params {
                let ty = param.mapped.annotated(profile, param.is_optional());
                let text = match &param.doc {
                    Some(doc) => format!("@arg {{{ty}}} arg.{} - {doc}", param.wire_name),
                    None => format!("@arg {{{ty}}} arg.{}", param.wire_name),
                };
                w.wrapped(&text, " * ");
            }
        }
        w.line(format!(
            " * @returns {{Promise.<{}, Error.<{}>>}}",
            route.result.documented(),
            route.error.documented()
        ));
        w.line(" */");

        let (params, arg) = if route.arg.void { ("", "null") } else { ("arg", "arg") };
        let mut call_args = vec![quote(&route.url), arg.to_string()];
        call_args.extend(
            route
                .positional
                .iter()
                .map(|value| value.as_deref().map_or_else(|| "null".to_string(), quote)),
        );
        w.line(format!("routes.{} = function ({params}) {{", route.function));
        w.indented(|w| w.line(format!("return this.request({});", call_args.join(", "))));
        w.line("};");
    }
}

impl Dialect for JavascriptDialect {
    fn bool_literal(&self, value: bool) -> String {
        value.to_string()
    }

    fn number_literal(&self, numeral: &str) -> String {
        numeral.to_string()
    }

    fn string_literal(&self, value: &str) -> String {
        quote(value)
    }

    fn null_literal(&self) -> String {
        "null".to_string()
    }

    fn timestamp_literal(&self, value: &str, _format: &str, _serializer: &str) -> String {
        quote(value)
    }

    fn bytes_literal(&self, value: &str) -> String {
        quote(value)
    }

    fn list_literal(&self, items: &[String]) -> String {
        format!("[{}]", items.join(", "))
    }

    fn construct_struct(&self, _class: &str, tag: Option<&str>, args: &[FieldArgument]) -> String {
        let entries: Vec<_> = tag.map(tagged).into_iter().chain(field_entries(args)).collect();
        object(&entries)
    }

    fn construct_union(&self, selection: &UnionSelection) -> String {
        let mut entries = vec![tagged(&selection.tag)];
        match &selection.payload {
            UnionPayload::Void => {}
            UnionPayload::Value(value) => entries.push((key(&selection.tag), value.clone())),
            UnionPayload::Struct { args, .. } => entries.extend(field_entries(args)),
        }
        object(&entries)
    }

    fn binds_compound_arguments(&self) -> bool {
        false
    }

    fn reserved_locals(&self) -> &'static [&'static str] {
        &["obj", "outputObj"]
    }

    fn declaration_artifacts(
        &self,
        ctx: &EmitContext<'_>,
        namespaces: &[NamespaceDecl],
    ) -> Result<Vec<Artifact>> {
        let preamble = ctx.render("javascript/routes", &json!({}))?;
        let mut w = ctx.writer();
        w.raw(&preamble);
        for route in namespaces.iter().flat_map(|namespace| &namespace.routes) {
            w.blank();
            Self::route_function(ctx, &mut w, route);
        }
        w.blank();
        w.line("module.exports = routes;");

        let filename = ctx
            .options
            .routes_filename
            .as_deref()
            .unwrap_or(DEFAULT_ROUTES_FILENAME);
        Ok(vec![Artifact::new(filename, w.into_lines())])
    }

    fn test_artifacts(&self, ctx: &EmitContext<'_>, suites: &[TestSuite]) -> Result<Vec<Artifact>> {
        let preamble = ctx.render("javascript/tests", &json!({}))?;
        let mut w = ctx.writer();
        w.raw(&preamble);
        for case in suites.iter().flat_map(|suite| &suite.cases) {
            w.blank();
            w.line(format!("test({}, () => {{", quote(&case.name)));
            w.indented(|w| {
                w.line(format!("// Data from the \"{}\" example", case.example));
                w.line(format!("const obj = {};", case.construction));
                w.line("const outputObj = roundTrip(obj);");
                w.line("assert.deepStrictEqual(outputObj, obj);");
            });
            w.line("});");
        }
        Ok(vec![Artifact::new(TESTS_FILENAME, w.into_lines())])
    }
}

//! Objective-C: Foundation object literals, `alloc`/`initWith…` construction,
//! one objects header and one routes header per namespace, and a single
//! XCTest case for round trips.

use super::{Dialect, UnionPayload, UnionSelection};
use crate::context::EmitContext;
use crate::declarations::{
    DataTypeDecl, NamespaceDecl, PropertyDecl, RouteDecl, StructDecl, UnionDecl,
};
use crate::literal::FieldArgument;
use crate::roundtrip::{TestCase, TestSuite};
use crate::types::Artifact;
use crate::writer::CodeWriter;
use apigen_core::{PrimitiveKind, Result};
use serde_json::json;

const TEST_LOCALS: &[&str] = &["obj", "serializedData", "jsonObj", "outputObj"];

/// Objective-C dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjcDialect;

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            // Octal escapes stop after three digits, unlike `\x`.
            c if c.is_control() && c.is_ascii() => {
                escaped.push_str(&format!("\\{:03o}", u32::from(c)));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

fn upper_first(ident: &str) -> String {
    let mut chars = ident.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// `Type *name` for pointer types, `Type name` otherwise.
fn declare(type_expression: &str, ident: &str) -> String {
    if type_expression.ends_with('*') {
        format!("{type_expression}{ident}")
    } else {
        format!("{type_expression} {ident}")
    }
}

fn send_init(class: &str, pieces: &[(&str, &str)]) -> String {
    if pieces.is_empty() {
        return format!("[[{class} alloc] init]");
    }
    let selector = pieces
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            if i == 0 {
                format!("initWith{}:{value}", upper_first(label))
            } else {
                format!("{label}:{value}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("[[{class} alloc] {selector}]")
}

fn doc_block(w: &mut CodeWriter, doc: Option<&str>) {
    if let Some(doc) = doc {
        w.wrapped(doc, "/// ");
    }
}

fn is_value_class(primitive: Option<PrimitiveKind>) -> bool {
    primitive.is_some_and(|kind| {
        kind.is_numeric() || matches!(kind, PrimitiveKind::Boolean | PrimitiveKind::String)
    })
}

impl ObjcDialect {
    fn parameter_list(ctx: &EmitContext<'_>, params: &[PropertyDecl]) -> String {
        params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let ty = param.mapped.annotated(ctx.profile, param.is_optional());
                if i == 0 {
                    format!(":({ty}){}", param.ident)
                } else {
                    format!(" {}:({ty}){}", param.ident, param.ident)
                }
            })
            .collect()
    }

    fn serializer_interface(
        ctx: &EmitContext<'_>,
        w: &mut CodeWriter,
        name: &str,
        kind: &str,
        class: &str,
        serializer: &str,
    ) {
        let reference = ctx.mapper.reference_expression(class);
        w.line(format!("#pragma mark - `{name}` serializer"));
        w.blank();
        w.line(format!("/// The serialization class for the `{name}` {kind}."));
        w.line(format!("@interface {serializer} : NSObject"));
        w.blank();
        w.line(format!("/// Serializes `{class}` instances."));
        w.line(format!(
            "+ (nullable NSDictionary<NSString *, id> *)serialize:({reference})instance;"
        ));
        w.blank();
        w.line(format!("/// Deserializes `{class}` instances."));
        w.line(format!(
            "+ ({reference})deserialize:(NSDictionary<NSString *, id> *)dict;"
        ));
        w.blank();
        w.line("@end");
    }

    fn struct_interface(ctx: &EmitContext<'_>, w: &mut CodeWriter, decl: &StructDecl) {
        let profile = ctx.profile;
        w.line(format!("#pragma mark - `{}`", decl.name));
        w.blank();
        doc_block(w, decl.doc.as_deref());
        if !decl.subtypes.is_empty() {
            if decl.doc.is_some() {
                w.line("///");
            }
            w.line("/// Serialized forms carry a `.tag` naming one of:");
            for (tag, class) in &decl.subtypes {
                w.line(format!("///   - `{tag}`: `{class}`"));
            }
        }
        w.line(format!(
            "@interface {} : {} <{}Serializable>",
            decl.class_name,
            decl.parent_class.as_deref().unwrap_or("NSObject"),
            profile.type_prefix
        ));
        w.blank();

        for field in &decl.fields {
            doc_block(w, field.doc.as_deref());
            let attributes = if is_value_class(field.primitive) {
                "nonatomic, readonly, copy"
            } else {
                "nonatomic, readonly"
            };
            let ty = field.mapped.annotated(profile, field.is_optional());
            w.line(format!("@property ({attributes}) {};", declare(&ty, &field.ident)));
            w.blank();
        }

        w.line("/// Designated initializer.");
        w.line("///");
        for param in &decl.init_params {
            let text = format!("@param {} {}", param.ident, param.doc.as_deref().unwrap_or(""));
            w.wrapped(text.trim_end(), "/// ");
        }
        if !decl.init_params.is_empty() {
            w.line("///");
        }
        w.line("/// @return An initialized instance.");
        let signature = match decl.init_params.first() {
            None => "init".to_string(),
            Some(first) => format!(
                "initWith{}{}",
                upper_first(&first.ident),
                Self::parameter_list(ctx, &decl.init_params)
            ),
        };
        w.line(format!("- (instancetype){signature};"));
        w.blank();
        w.line("@end");
        w.blank();
        Self::serializer_interface(ctx, w, &decl.name, "struct", &decl.class_name, &decl.serializer);
    }

    fn union_interface(ctx: &EmitContext<'_>, w: &mut CodeWriter, decl: &UnionDecl) {
        let profile = ctx.profile;
        let class = &decl.class_name;
        let tag_enum = format!("{class}Tag");

        w.line(format!("#pragma mark - `{}`", decl.name));
        w.blank();
        w.wrapped(
            &format!(
                "The `{tag_enum}` enum type represents the possible tag states with which the `{class}` union can exist."
            ),
            "/// ",
        );
        w.line(format!("typedef NS_ENUM(NSInteger, {tag_enum}) {{"));
        w.indented(|w| {
            for variant in &decl.variants {
                doc_block(w, variant.doc.as_deref());
                w.line(format!("{class}{},", variant.selector));
            }
        });
        w.line("};");
        w.blank();

        doc_block(w, decl.doc.as_deref());
        if decl.doc.is_some() {
            w.line("///");
        }
        w.line("/// This class is a tagged union. Query `tag` for the active variant.");
        w.line(format!(
            "@interface {class} : NSObject <{}Serializable>",
            profile.type_prefix
        ));
        w.blank();
        w.line("/// Represents the union's current tag state.");
        w.line(format!("@property (nonatomic, readonly) {tag_enum} tag;"));
        w.blank();

        for variant in &decl.variants {
            let Some(payload) = &variant.payload else {
                continue;
            };
            doc_block(w, variant.doc.as_deref());
            w.wrapped(
                &format!(
                    "@note Ensure `is{}` returns true before accessing, otherwise a runtime exception is raised.",
                    variant.selector
                ),
                "/// ",
            );
            let ty = payload.annotated(profile, false);
            w.line(format!("@property (nonatomic, readonly) {};", declare(&ty, &variant.ident)));
            w.blank();
        }

        for variant in &decl.variants {
            w.line(format!(
                "/// Initializes union class with tag state of \"{}\".",
                variant.wire_name
            ));
            match &variant.payload {
                None => w.line(format!("- (instancetype)initWith{};", variant.selector)),
                Some(payload) => w.line(format!(
                    "- (instancetype)initWith{}:({}){};",
                    variant.selector,
                    payload.annotated(profile, false),
                    variant.ident
                )),
            }
            w.blank();
        }

        for variant in &decl.variants {
            w.line(format!(
                "/// Retrieves whether the union's current tag state has value \"{}\".",
                variant.wire_name
            ));
            w.line(format!("- (BOOL)is{};", variant.selector));
            w.blank();
        }

        w.line("/// Retrieves string value of union's current tag state.");
        w.line("- (NSString *)tagName;");
        w.blank();
        w.line("@end");
        w.blank();
        Self::serializer_interface(ctx, w, &decl.name, "union", class, &decl.serializer);
    }

    fn objects_header(ctx: &EmitContext<'_>, namespace: &NamespaceDecl) -> Result<Artifact> {
        let prefix = &ctx.profile.type_prefix;
        let imports: Vec<String> = namespace
            .imports
            .iter()
            .map(|name| format!("{prefix}{}Objects.h", ctx.names().type_name(name)))
            .collect();
        let classes: Vec<&str> = namespace
            .data_types
            .iter()
            .map(DataTypeDecl::class_name)
            .collect();
        let preamble = ctx.render(
            "objc/objects_header",
            &json!({
                "namespace": namespace.name,
                "prefix": prefix,
                "imports": imports,
                "classes": classes,
            }),
        )?;

        let mut w = ctx.writer();
        w.raw(&preamble);
        for decl in &namespace.data_types {
            w.blank();
            match decl {
                DataTypeDecl::Struct(decl) => Self::struct_interface(ctx, &mut w, decl),
                DataTypeDecl::Union(decl) => Self::union_interface(ctx, &mut w, decl),
            }
        }
        w.blank();
        w.line("NS_ASSUME_NONNULL_END");

        Ok(Artifact::new(
            format!("{prefix}{}Objects.h", namespace.ident),
            w.into_lines(),
        ))
    }

    fn route_method(ctx: &EmitContext<'_>, w: &mut CodeWriter, route: &RouteDecl) {
        let profile = ctx.profile;
        doc_block(w, route.doc.as_deref());

        let mut params = Vec::new();
        for extra in &route.extra_args {
            params.push(format!(
                "@param {} ({}) {}",
                extra.name,
                extra.arg_type,
                extra.doc.as_deref().unwrap_or("")
            ));
        }
        for param in &route.params {
            params.push(format!(
                "@param {} ({}) {}",
                param.ident,
                param.mapped.annotated(profile, param.is_optional()),
                param.doc.as_deref().unwrap_or("")
            ));
        }
        if route.params.is_empty() && !route.arg.void {
            params.push(format!("@param arg ({})", route.arg.annotated(profile, false)));
        }

        if route.doc.is_some() && !params.is_empty() {
            w.line("///");
        }
        for param in &params {
            w.wrapped(param.trim_end(), "/// ");
        }
        if !params.is_empty() || route.doc.is_some() {
            w.line("///");
        }
        w.wrapped(
            &format!(
                "@return Through the response callback, the caller will receive a `{}` object on success or a `{}` object on failure.",
                route.result.documented(),
                route.error.documented()
            ),
            "/// ",
        );
        if route.deprecated {
            w.line("/// @deprecated");
        }

        let arguments = if !route.params.is_empty() {
            Self::parameter_list(ctx, &route.params)
        } else if route.arg.void {
            String::new()
        } else {
            format!(":({})arg", route.arg.annotated(profile, false))
        };
        let attribute = if route.deprecated { " __deprecated" } else { "" };
        w.line(format!(
            "- ({}RpcTask *){}{arguments}{attribute};",
            profile.type_prefix, route.method
        ));
    }

    fn routes_header(ctx: &EmitContext<'_>, namespace: &NamespaceDecl) -> Result<Artifact> {
        let prefix = &ctx.profile.type_prefix;
        let class = format!("{prefix}{}Routes", namespace.ident);
        let preamble = ctx.render(
            "objc/routes_header",
            &json!({
                "namespace": namespace.name,
                "prefix": prefix,
                "objects_header": format!("{prefix}{}Objects.h", namespace.ident),
            }),
        )?;

        let mut w = ctx.writer();
        w.raw(&preamble);
        w.blank();
        w.line(format!("/// Routes of the `{}` namespace.", namespace.name));
        w.line(format!("@interface {class} : NSObject"));
        w.blank();
        w.line("/// The transport client used to dispatch requests.");
        w.line(format!(
            "@property (nonatomic, readonly) id<{prefix}TransportClient> client;"
        ));
        w.blank();
        w.line("/// Initializes the route object with a transport client.");
        w.line(format!(
            "- (instancetype)init:(id<{prefix}TransportClient>)client;"
        ));
        for route in &namespace.routes {
            w.blank();
            Self::route_method(ctx, &mut w, route);
        }
        w.blank();
        w.line("@end");
        w.blank();
        w.line("NS_ASSUME_NONNULL_END");

        Ok(Artifact::new(format!("{class}.h"), w.into_lines()))
    }

    fn test_method(ctx: &EmitContext<'_>, w: &mut CodeWriter, case: &TestCase) {
        let prefix = &ctx.profile.type_prefix;
        w.line(format!("- (void){} {{", case.name));
        w.indented(|w| {
            w.line(format!("/// Data from the \"{}\" example", case.example));
            for binding in &case.bindings {
                w.line(format!(
                    "{} = {};",
                    declare(&binding.type_expression, &binding.ident),
                    binding.expression
                ));
            }
            w.line(format!(
                "{} = {};",
                declare(&case.type_expression, "obj"),
                case.construction
            ));
            w.line(format!(
                "NSData *serializedData = [{prefix}TransportClient jsonDataWithDictionary:[{} serialize:obj]];",
                case.serializer
            ));
            w.line(
                "id jsonObj = [NSJSONSerialization JSONObjectWithData:serializedData options:NSJSONReadingMutableContainers error:nil];",
            );
            w.line(format!(
                "{} = [{} deserialize:jsonObj];",
                declare(&case.type_expression, "outputObj"),
                case.serializer
            ));
            w.line("[self checkError:obj outputObj:outputObj];");
        });
        w.line("}");
    }
}

impl Dialect for ObjcDialect {
    fn bool_literal(&self, value: bool) -> String {
        let literal = if value { "@YES" } else { "@NO" };
        literal.to_string()
    }

    fn number_literal(&self, numeral: &str) -> String {
        format!("@({numeral})")
    }

    fn string_literal(&self, value: &str) -> String {
        format!("@\"{}\"", escape(value))
    }

    fn null_literal(&self) -> String {
        "nil".to_string()
    }

    fn timestamp_literal(&self, value: &str, format: &str, serializer: &str) -> String {
        format!(
            "[{serializer} deserialize:{} dateFormat:{}]",
            self.string_literal(value),
            self.string_literal(format)
        )
    }

    fn bytes_literal(&self, value: &str) -> String {
        format!(
            "[{} dataUsingEncoding:NSUTF8StringEncoding]",
            self.string_literal(value)
        )
    }

    fn list_literal(&self, items: &[String]) -> String {
        format!("@[{}]", items.join(", "))
    }

    fn construct_struct(&self, class: &str, _tag: Option<&str>, args: &[FieldArgument]) -> String {
        let pieces: Vec<(&str, &str)> = args
            .iter()
            .map(|arg| (arg.ident.as_str(), arg.literal.expression.as_str()))
            .collect();
        send_init(class, &pieces)
    }

    fn construct_union(&self, selection: &UnionSelection) -> String {
        let class = &selection.class;
        let selector = &selection.selector;
        match &selection.payload {
            UnionPayload::Void => format!("[[{class} alloc] initWith{selector}]"),
            UnionPayload::Value(value) => format!("[[{class} alloc] initWith{selector}:{value}]"),
            UnionPayload::Struct { class: inner, tag, args } => format!(
                "[[{class} alloc] initWith{selector}:{}]",
                self.construct_struct(inner, tag.as_deref(), args)
            ),
        }
    }

    fn binds_compound_arguments(&self) -> bool {
        true
    }

    fn reserved_locals(&self) -> &'static [&'static str] {
        TEST_LOCALS
    }

    fn declaration_artifacts(
        &self,
        ctx: &EmitContext<'_>,
        namespaces: &[NamespaceDecl],
    ) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::new();
        for namespace in namespaces {
            artifacts.push(Self::objects_header(ctx, namespace)?);
            if !namespace.routes.is_empty() {
                artifacts.push(Self::routes_header(ctx, namespace)?);
            }
        }
        Ok(artifacts)
    }

    fn test_artifacts(&self, ctx: &EmitContext<'_>, suites: &[TestSuite]) -> Result<Vec<Artifact>> {
        let prefix = &ctx.profile.type_prefix;
        let class_name = format!("{prefix}SerializationTests");
        let imports: Vec<String> = suites
            .iter()
            .filter(|suite| !suite.cases.is_empty())
            .map(|suite| format!("{prefix}{}Objects.h", suite.namespace_ident))
            .collect();
        let preamble = ctx.render(
            "objc/tests",
            &json!({
                "prefix": prefix,
                "imports": imports,
                "class_name": class_name,
            }),
        )?;

        let mut w = ctx.writer();
        w.raw(&preamble);
        for suite in suites {
            w.blank();
            w.line(format!("#pragma mark - `{}` tests", suite.namespace));
            for case in &suite.cases {
                w.blank();
                Self::test_method(ctx, &mut w, case);
            }
        }
        w.blank();
        w.line("@end");

        Ok(vec![Artifact::new(format!("{class_name}.m"), w.into_lines())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Literal;

    fn arg(ident: &str, expression: &str) -> FieldArgument {
        FieldArgument {
            ident: ident.to_string(),
            wire_name: ident.to_string(),
            literal: Literal {
                expression: expression.to_string(),
                binding_type: None,
            },
        }
    }

    #[test]
    fn test_literals() {
        let d = ObjcDialect;
        assert_eq!(d.bool_literal(true), "@YES");
        assert_eq!(d.number_literal("-3"), "@(-3)");
        assert_eq!(d.string_literal("say \"hi\"\n"), r#"@"say \"hi\"\n""#);
        assert_eq!(
            d.list_literal(&["@(1)".to_string(), "@(2)".to_string()]),
            "@[@(1), @(2)]"
        );
        assert_eq!(
            d.timestamp_literal("2015-05-12", "%Y-%m-%d", "DbxNSDateSerializer"),
            r#"[DbxNSDateSerializer deserialize:@"2015-05-12" dateFormat:@"%Y-%m-%d"]"#
        );
    }

    #[test]
    fn test_control_characters_use_octal_escapes() {
        let d = ObjcDialect;
        assert_eq!(d.string_literal("a\u{0}1"), r#"@"a\0001""#);
        assert_eq!(d.string_literal("\u{1b}[0m"), r#"@"\033[0m""#);
        assert_eq!(d.string_literal("\u{7f}"), r#"@"\177""#);
        assert_eq!(d.string_literal("é"), "@\"é\"");
    }

    #[test]
    fn test_construct_struct_selector() {
        let d = ObjcDialect;
        assert_eq!(d.construct_struct("DbxA", None, &[]), "[[DbxA alloc] init]");
        assert_eq!(
            d.construct_struct("DbxA", None, &[arg("name", "@\"x\""), arg("size", "@(1)")]),
            r#"[[DbxA alloc] initWithName:@"x" size:@(1)]"#
        );
    }

    #[test]
    fn test_construct_union() {
        let d = ObjcDialect;
        let mut selection = UnionSelection {
            class: "DbxFilesWriteMode".to_string(),
            tag: "add".to_string(),
            selector: "Add".to_string(),
            payload: UnionPayload::Void,
        };
        assert_eq!(
            d.construct_union(&selection),
            "[[DbxFilesWriteMode alloc] initWithAdd]"
        );
        selection.selector = "Update".to_string();
        selection.payload = UnionPayload::Value("@\"rev\"".to_string());
        assert_eq!(
            d.construct_union(&selection),
            r#"[[DbxFilesWriteMode alloc] initWithUpdate:@"rev"]"#
        );
    }

    #[test]
    fn test_declare() {
        assert_eq!(declare("NSArray<NSString *> *", "tags"), "NSArray<NSString *> *tags");
        assert_eq!(declare("NSString * _Nonnull", "name"), "NSString * _Nonnull name");
    }
}

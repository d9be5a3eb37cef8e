//! Round-trip test descriptors.
//!
//! One test case per struct example: construct the value from the
//! example, serialize it, deserialize the result and compare. Examples of a
//! polymorphic base construct the subtype named by their `.tag`.

use crate::context::EmitContext;
use crate::literal::ExampleScope;
use crate::profile::CaseStyle;
use apigen_core::Result;
use std::collections::HashSet;
use tracing::debug;

/// A local bound before construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Local name
    pub ident: String,
    /// Declared type of the local
    pub type_expression: String,
    /// Value expression
    pub expression: String,
}

/// One round-trip test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Test function name (`testSerializeFilesMetadataDefault`)
    pub name: String,
    /// Example label
    pub example: String,
    /// Class of the constructed value
    pub class_name: String,
    /// Declared type of the constructed value
    pub type_expression: String,
    /// Serializer reference of the constructed class
    pub serializer: String,
    /// Locals bound before construction, in field order
    pub bindings: Vec<Binding>,
    /// Construction expression
    pub construction: String,
}

/// Test cases of one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuite {
    /// Namespace name in the model
    pub namespace: String,
    /// Upper camel form of the namespace
    pub namespace_ident: String,
    /// Cases in struct, then example declaration order
    pub cases: Vec<TestCase>,
}

/// Builds round-trip test descriptors from struct examples.
#[derive(Debug, Clone, Copy)]
pub struct RoundTripEmitter<'c, 'a> {
    ctx: &'c EmitContext<'a>,
}

impl<'c, 'a> RoundTripEmitter<'c, 'a> {
    /// Creates an emitter for a run.
    #[must_use]
    pub const fn new(ctx: &'c EmitContext<'a>) -> Self {
        Self { ctx }
    }

    /// Describes the test cases of every namespace.
    ///
    /// # Errors
    ///
    /// Fails on the first example that cannot be synthesized.
    pub fn build(&self) -> Result<Vec<TestSuite>> {
        let ctx = self.ctx;
        let names = ctx.names();
        let synth = ctx.synthesizer();
        let profile = ctx.profile;
        let mut suites = Vec::new();
        let mut test_names = HashSet::new();

        for namespace in ctx.api.namespaces() {
            let namespace_ident = names.type_name(&namespace.name);
            let mut cases = Vec::new();

            for data_type in namespace.structs() {
                let type_ident = names.type_name(&data_type.name);
                for (label, example) in &data_type.examples {
                    let scope = ExampleScope {
                        namespace: &namespace.name,
                        data_type: &data_type.name,
                        example: label,
                    };
                    let (target, tag) = synth.resolve_subtype(data_type, &example.value, scope)?;
                    let mut args = synth.field_arguments(target, &example.value, scope)?;

                    let mut bindings: Vec<Binding> = Vec::new();
                    if ctx.dialect.binds_compound_arguments() {
                        for arg in &mut args {
                            let Some(type_expression) = arg.literal.binding_type.take() else {
                                continue;
                            };
                            let mut ident = arg.ident.clone();
                            while ctx.dialect.reserved_locals().contains(&ident.as_str())
                                || bindings.iter().any(|binding| binding.ident == ident)
                            {
                                ident.push_str(&profile.escape_suffix);
                            }
                            let expression =
                                std::mem::replace(&mut arg.literal.expression, ident.clone());
                            bindings.push(Binding {
                                ident,
                                type_expression,
                                expression,
                            });
                        }
                    }

                    // Distinct labels may format alike ("foo bar", "foo_bar").
                    let mut name = format!(
                        "testSerialize{namespace_ident}{type_ident}{}",
                        names.format_unescaped(label, CaseStyle::UpperCamel)
                    );
                    while test_names.contains(&name) {
                        name.push_str(&profile.escape_suffix);
                    }
                    test_names.insert(name.clone());

                    let class_name = ctx.mapper.struct_class(target);
                    let case = TestCase {
                        name,
                        example: label.clone(),
                        type_expression: ctx.mapper.reference_expression(&class_name),
                        serializer: ctx.mapper.class_serializer(&class_name),
                        construction: ctx.dialect.construct_struct(&class_name, tag, &args),
                        class_name,
                        bindings,
                    };
                    debug!(test = %case.name, "built round-trip test");
                    cases.push(case);
                }
            }

            suites.push(TestSuite {
                namespace: namespace.name.clone(),
                namespace_ident,
                cases,
            });
        }

        Ok(suites)
    }
}

//! Literal synthesis from example values.
//!
//! Example values are checked against their declared abstract type and
//! rendered as target-language expressions. Every failure is reported with
//! the example it came from; nothing is silently dropped.

use crate::dialect::{Dialect, UnionPayload, UnionSelection};
use crate::mapper::TypeMapper;
use apigen_core::{
    AbstractType, Api, DataType, Error, ExampleObject, ExampleValue, PrimitiveKind, Result,
    Struct, Terminal, TypeRef, Union,
};

/// A rendered literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Target-language expression
    pub expression: String,
    /// Declared type of an intermediate binding, for compound values that a
    /// dialect may bind to a local before use
    pub binding_type: Option<String>,
}

impl Literal {
    fn simple(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            binding_type: None,
        }
    }

    fn compound(expression: impl Into<String>, binding_type: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            binding_type: Some(binding_type.into()),
        }
    }

    /// Whether the literal is compound (list, user-defined, timestamp).
    #[must_use]
    pub const fn needs_binding(&self) -> bool {
        self.binding_type.is_some()
    }
}

/// One constructor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldArgument {
    /// Formatted field identifier
    pub ident: String,
    /// Field name on the wire
    pub wire_name: String,
    /// Rendered value
    pub literal: Literal,
}

/// Identifies the example being synthesized, for error reports.
#[derive(Debug, Clone, Copy)]
pub struct ExampleScope<'a> {
    /// Namespace of the data type owning the example
    pub namespace: &'a str,
    /// Data type owning the example
    pub data_type: &'a str,
    /// Example label
    pub example: &'a str,
}

impl ExampleScope<'_> {
    fn describe(&self, path: &str) -> String {
        let mut context = format!(
            "example '{}' of {}.{}",
            self.example, self.namespace, self.data_type
        );
        if !path.is_empty() {
            context.push_str(&format!(" at '{path}'"));
        }
        context
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

/// Renders example values as target expressions.
#[derive(Debug, Clone, Copy)]
pub struct LiteralSynthesizer<'a> {
    api: &'a Api,
    mapper: TypeMapper<'a>,
    dialect: &'a dyn Dialect,
}

impl<'a> LiteralSynthesizer<'a> {
    /// Creates a synthesizer resolving references in `api`.
    #[must_use]
    pub const fn new(api: &'a Api, mapper: TypeMapper<'a>, dialect: &'a dyn Dialect) -> Self {
        Self {
            api,
            mapper,
            dialect,
        }
    }

    /// Renders `value` as an expression of type `declared`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExampleValue`] when the value does not fit the
    /// declared type, and the missing-value and tag errors of nested structs
    /// and unions.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_codegen::dialect;
    /// use apigen_codegen::literal::{ExampleScope, LiteralSynthesizer};
    /// use apigen_codegen::mapper::TypeMapper;
    /// use apigen_codegen::profile::TypeProfile;
    /// use apigen_core::{AbstractType, Api, ExampleValue};
    ///
    /// let api = Api::new(Vec::new(), Vec::new());
    /// let profile = TypeProfile::builtin("objc").unwrap();
    /// let synth = LiteralSynthesizer::new(
    ///     &api,
    ///     TypeMapper::new(&profile),
    ///     dialect::for_kind(profile.dialect),
    /// );
    /// let scope = ExampleScope { namespace: "files", data_type: "Entry", example: "default" };
    ///
    /// let literal = synth
    ///     .synthesize(
    ///         &ExampleValue::from(vec![ExampleValue::from("a"), ExampleValue::from("b")]),
    ///         &AbstractType::list(AbstractType::string()),
    ///         scope,
    ///     )
    ///     .unwrap();
    /// assert_eq!(literal.expression, r#"@[@"a", @"b"]"#);
    /// assert!(literal.needs_binding());
    /// ```
    pub fn synthesize(
        &self,
        value: &ExampleValue,
        declared: &AbstractType,
        scope: ExampleScope<'_>,
    ) -> Result<Literal> {
        self.synth(value, declared, scope, "")
    }

    /// Picks the concrete struct for an example of `base`.
    ///
    /// Structs without enumerated subtypes are their own concrete type. For
    /// polymorphic bases the example's `.tag` selects the subtype.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSubtypeTag`] when a polymorphic example has no
    /// tag and [`Error::UnknownSubtypeTag`] when the tag matches no subtype.
    pub fn resolve_subtype<'s>(
        &'s self,
        base: &'s Struct,
        object: &'s ExampleObject,
        scope: ExampleScope<'_>,
    ) -> Result<(&'s Struct, Option<&'s str>)> {
        if !base.has_enumerated_subtypes() {
            return Ok((base, None));
        }
        let tag = object.tag().ok_or_else(|| Error::MissingSubtypeTag {
            namespace: base.namespace.clone(),
            data_type: base.name.clone(),
            example: scope.example.to_string(),
        })?;
        let subtype = self.api.find_subtype(base, tag)?;
        Ok((subtype, Some(tag)))
    }

    /// Renders constructor arguments for `target`, one per non-void field in
    /// declared order (inherited fields first).
    ///
    /// An absent field takes its default, then the null literal if it is
    /// nullable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingExampleValue`] for an absent required field
    /// without a default.
    pub fn field_arguments(
        &self,
        target: &Struct,
        object: &ExampleObject,
        scope: ExampleScope<'_>,
    ) -> Result<Vec<FieldArgument>> {
        self.field_arguments_at(target, object, scope, "")
    }

    fn field_arguments_at(
        &self,
        target: &Struct,
        object: &ExampleObject,
        scope: ExampleScope<'_>,
        path: &str,
    ) -> Result<Vec<FieldArgument>> {
        let mut args = Vec::new();
        for field in self.api.all_fields(target)? {
            if field.data_type.is_void() {
                continue;
            }
            let field_path = join(path, &field.name);
            let literal = match object.get(&field.name).or(field.default.as_ref()) {
                Some(value) => self.synth(value, &field.data_type, scope, &field_path)?,
                None if field.is_nullable() => Literal::simple(self.dialect.null_literal()),
                None => {
                    return Err(Error::MissingExampleValue {
                        namespace: target.namespace.clone(),
                        data_type: target.name.clone(),
                        example: scope.example.to_string(),
                        field: field.name.clone(),
                    });
                }
            };
            args.push(FieldArgument {
                ident: self.mapper.names().field(&field.name),
                wire_name: field.name.clone(),
                literal,
            });
        }
        Ok(args)
    }

    fn synth(
        &self,
        value: &ExampleValue,
        declared: &AbstractType,
        scope: ExampleScope<'_>,
        path: &str,
    ) -> Result<Literal> {
        let unwrapped = declared.unwrap_type();
        if value.is_null() {
            let void = matches!(unwrapped.terminal, Terminal::Primitive(PrimitiveKind::Void));
            if unwrapped.nullable || void {
                return Ok(Literal::simple(self.dialect.null_literal()));
            }
            return Err(mismatch(scope, path, "a non-null value", value));
        }

        match unwrapped.terminal {
            Terminal::Primitive(kind) => self.primitive(kind, value, declared, scope, path),
            Terminal::List(element) => {
                let ExampleValue::List(items) = value else {
                    return Err(mismatch(scope, path, "list", value));
                };
                let items = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        self.synth(item, element, scope, &format!("{path}[{i}]"))
                            .map(|literal| literal.expression)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Literal::compound(
                    self.dialect.list_literal(&items),
                    self.mapper.resolve(declared).expression,
                ))
            }
            Terminal::UserDefined(type_ref) => match self.api.lookup(type_ref)? {
                DataType::Struct(data_type) => {
                    let ExampleValue::Object(object) = value else {
                        return Err(mismatch(scope, path, &type_ref.to_string(), value));
                    };
                    let (target, tag) = self.resolve_subtype(data_type, object, scope)?;
                    let args = self.field_arguments_at(target, object, scope, path)?;
                    let class = self.mapper.struct_class(target);
                    Ok(Literal::compound(
                        self.dialect.construct_struct(&class, tag, &args),
                        self.mapper.reference_expression(&class),
                    ))
                }
                DataType::Union(union) => {
                    let selection = self.union_selection(union, value, scope, path)?;
                    Ok(Literal::compound(
                        self.dialect.construct_union(&selection),
                        self.mapper.resolve(declared).expression,
                    ))
                }
            },
        }
    }

    fn primitive(
        &self,
        kind: PrimitiveKind,
        value: &ExampleValue,
        declared: &AbstractType,
        scope: ExampleScope<'_>,
        path: &str,
    ) -> Result<Literal> {
        let dialect = self.dialect;
        let expression = match (kind, value) {
            (PrimitiveKind::Boolean, ExampleValue::Bool(flag)) => dialect.bool_literal(*flag),
            (kind, ExampleValue::Integer(_) | ExampleValue::Unsigned(_) | ExampleValue::Float(_))
                if kind.is_integer() =>
            {
                let Some(numeral) = integer_numeral(kind, value) else {
                    let expected = format!("an integer in the {kind} range");
                    return Err(mismatch(scope, path, &expected, value));
                };
                dialect.number_literal(&numeral)
            }
            (PrimitiveKind::Float32 | PrimitiveKind::Float64, ExampleValue::Integer(n)) => {
                dialect.number_literal(&n.to_string())
            }
            (PrimitiveKind::Float32 | PrimitiveKind::Float64, ExampleValue::Unsigned(n)) => {
                dialect.number_literal(&n.to_string())
            }
            (PrimitiveKind::Float32 | PrimitiveKind::Float64, ExampleValue::Float(x)) => {
                dialect.number_literal(&x.to_string())
            }
            (PrimitiveKind::String, ExampleValue::String(text)) => dialect.string_literal(text),
            (PrimitiveKind::Bytes, ExampleValue::String(text)) => dialect.bytes_literal(text),
            (PrimitiveKind::Timestamp, ExampleValue::String(text)) => {
                let format = &self.mapper.names().profile().timestamp_format;
                let mapped = self.mapper.resolve(declared);
                return Ok(Literal::compound(
                    dialect.timestamp_literal(text, format, &mapped.serializer),
                    mapped.expression,
                ));
            }
            (PrimitiveKind::Void, _) => dialect.null_literal(),
            (kind, value) => return Err(mismatch(scope, path, kind.name(), value)),
        };
        Ok(Literal::simple(expression))
    }

    fn union_selection(
        &self,
        union: &Union,
        value: &ExampleValue,
        scope: ExampleScope<'_>,
        path: &str,
    ) -> Result<UnionSelection> {
        let (tag, object) = match value {
            ExampleValue::String(tag) => (tag.as_str(), None),
            ExampleValue::Object(object) => {
                let tag = object
                    .tag()
                    .ok_or_else(|| mismatch(scope, path, "a union selection with a tag", value))?;
                (tag, Some(object))
            }
            other => return Err(mismatch(scope, path, "a union selection", other)),
        };

        let variant = union.variant(tag).ok_or_else(|| Error::UnknownVariant {
            namespace: union.namespace.clone(),
            data_type: union.name.clone(),
            tag: tag.to_string(),
        })?;

        let payload = match variant.payload_type() {
            None => UnionPayload::Void,
            Some(payload_type) => {
                let nested = object.and_then(|object| object.get(tag));
                match (nested, self.struct_of(payload_type)?) {
                    (Some(inner), _) => UnionPayload::Value(
                        self.synth(inner, payload_type, scope, &join(path, tag))?
                            .expression,
                    ),
                    (None, Some(data_type)) => {
                        let fields = object.map(ExampleObject::without_tag).unwrap_or_default();
                        let (target, subtag) = self.resolve_subtype(data_type, &fields, scope)?;
                        UnionPayload::Struct {
                            class: self.mapper.struct_class(target),
                            tag: subtag.map(str::to_string),
                            args: self.field_arguments_at(target, &fields, scope, path)?,
                        }
                    }
                    (None, None) if payload_type.is_nullable() => {
                        UnionPayload::Value(self.dialect.null_literal())
                    }
                    (None, None) => {
                        return Err(Error::MissingExampleValue {
                            namespace: union.namespace.clone(),
                            data_type: union.name.clone(),
                            example: scope.example.to_string(),
                            field: tag.to_string(),
                        });
                    }
                }
            }
        };

        Ok(UnionSelection {
            class: self
                .mapper
                .class_name(&TypeRef::new(&union.namespace, &union.name)),
            tag: tag.to_string(),
            selector: self.mapper.names().type_name(&variant.name),
            payload,
        })
    }

    fn struct_of(&self, ty: &AbstractType) -> Result<Option<&'a Struct>> {
        match ty.unwrap_type().terminal {
            Terminal::UserDefined(type_ref) => Ok(self.api.lookup(type_ref)?.as_struct()),
            _ => Ok(None),
        }
    }
}

/// Decimal numeral of an integer example, if it fits `kind`.
///
/// Floats are accepted when they carry an integral value.
fn integer_numeral(kind: PrimitiveKind, value: &ExampleValue) -> Option<String> {
    let n = match value {
        ExampleValue::Integer(n) => i128::from(*n),
        ExampleValue::Unsigned(n) => i128::from(*n),
        ExampleValue::Float(x) if x.is_finite() && x.fract() == 0.0 => {
            format!("{x:.0}").parse::<i128>().ok()?
        }
        _ => return None,
    };
    let (min, max) = match kind {
        PrimitiveKind::Int32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
        PrimitiveKind::Int64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
        PrimitiveKind::UInt32 => (0, i128::from(u32::MAX)),
        PrimitiveKind::UInt64 => (0, i128::from(u64::MAX)),
        _ => return None,
    };
    (min..=max).contains(&n).then(|| n.to_string())
}

fn mismatch(scope: ExampleScope<'_>, path: &str, expected: &str, found: &ExampleValue) -> Error {
    Error::InvalidExampleValue {
        context: scope.describe(path),
        expected: expected.to_string(),
        found: found.kind_name().to_string(),
    }
}

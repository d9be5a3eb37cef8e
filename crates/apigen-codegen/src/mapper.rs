//! Type mapping from abstract types to target type expressions.
//!
//! Mapping is total: every [`AbstractType`] produces a non-empty
//! expression. Primitive kinds a profile does not spell fall back to the
//! formatted kind name; the generator reports those kinds once per run.

use crate::naming::IdentifierFormatter;
use crate::profile::TypeProfile;
use apigen_core::{AbstractType, PrimitiveKind, Struct, Terminal, TypeRef};
use tracing::debug;

/// A resolved target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Type expression as written in declarations (`NSArray<NSString *> *`)
    pub expression: String,
    /// Expression without the reference suffix (`NSArray<NSString *>`)
    pub class_name: String,
    /// Whether the abstract type is wrapped nullable
    pub nullable: bool,
    /// Whether the terminal type is `Void`
    pub void: bool,
    /// Serializer reference
    pub serializer: String,
    /// Qualified identifier of the outermost alias, if any
    pub alias: Option<String>,
}

impl MappedType {
    /// The expression with the profile's nullability marker.
    ///
    /// `force_nullable` lets callers treat fields with a default as
    /// nullable in documentation.
    #[must_use]
    pub fn annotated(&self, profile: &TypeProfile, force_nullable: bool) -> String {
        if self.nullable || force_nullable {
            format!("{}{}", self.expression, profile.nullable_marker)
        } else if self.void {
            self.expression.clone()
        } else {
            match &profile.nonnull_marker {
                Some(marker) => format!("{}{marker}", self.expression),
                None => self.expression.clone(),
            }
        }
    }

    /// Name for documentation: the alias when the type was reached through
    /// one, otherwise the expression.
    #[must_use]
    pub fn documented(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.expression)
    }
}

/// Resolves abstract types under a profile.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'p> {
    names: IdentifierFormatter<'p>,
}

impl<'p> TypeMapper<'p> {
    /// Creates a mapper for `profile`.
    #[must_use]
    pub const fn new(profile: &'p TypeProfile) -> Self {
        Self {
            names: IdentifierFormatter::new(profile),
        }
    }

    /// The identifier formatter the mapper uses.
    #[must_use]
    pub const fn names(&self) -> &IdentifierFormatter<'p> {
        &self.names
    }

    fn profile(&self) -> &'p TypeProfile {
        self.names.profile()
    }

    /// Resolves `ty` to a target type.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_codegen::mapper::TypeMapper;
    /// use apigen_codegen::profile::TypeProfile;
    /// use apigen_core::AbstractType;
    ///
    /// let profile = TypeProfile::builtin("objc").unwrap();
    /// let mapper = TypeMapper::new(&profile);
    ///
    /// let mapped = mapper.resolve(&AbstractType::list(AbstractType::string()).nullable());
    /// assert_eq!(mapped.expression, "NSArray<NSString *> *");
    /// assert!(mapped.nullable);
    /// assert_eq!(mapped.serializer, "DbxArraySerializer");
    /// ```
    #[must_use]
    pub fn resolve(&self, ty: &AbstractType) -> MappedType {
        let profile = self.profile();
        let unwrapped = ty.unwrap_type();
        let alias = unwrapped
            .alias
            .map(|(namespace, name)| self.qualified(namespace, name));

        let (expression, serializer, void) = match unwrapped.terminal {
            Terminal::Primitive(kind) => (
                self.primitive_spelling(kind),
                self.primitive_serializer(kind),
                kind == PrimitiveKind::Void,
            ),
            Terminal::List(element) => {
                let element = self.resolve(element);
                let element_expression = if profile.annotate_list_elements && element.nullable {
                    format!("{}{}", element.expression, profile.nullable_marker)
                } else {
                    element.expression
                };
                (
                    profile.list_template.replace("{element}", &element_expression),
                    profile.list_serializer.clone(),
                    false,
                )
            }
            Terminal::UserDefined(type_ref) => {
                let class = self.class_name(type_ref);
                (
                    self.reference_expression(&class),
                    self.class_serializer(&class),
                    false,
                )
            }
        };

        let class_name = expression
            .strip_suffix(profile.reference_suffix.as_str())
            .filter(|_| !profile.reference_suffix.is_empty())
            .unwrap_or(expression.as_str())
            .to_string();

        MappedType {
            expression,
            class_name,
            nullable: unwrapped.nullable,
            void,
            serializer,
            alias,
        }
    }

    /// Qualified class name of a user-defined type (`DbxFilesMetadata`).
    #[must_use]
    pub fn class_name(&self, type_ref: &TypeRef) -> String {
        self.qualified(&type_ref.namespace, &type_ref.name)
    }

    /// Qualified class name of a struct.
    #[must_use]
    pub fn struct_class(&self, data_type: &Struct) -> String {
        self.qualified(&data_type.namespace, &data_type.name)
    }

    /// Reference expression for a class name (`DbxFilesMetadata *`).
    #[must_use]
    pub fn reference_expression(&self, class: &str) -> String {
        format!("{class}{}", self.profile().reference_suffix)
    }

    /// Serializer reference for a class name.
    #[must_use]
    pub fn class_serializer(&self, class: &str) -> String {
        self.profile().serializer_template.replace("{class}", class)
    }

    fn qualified(&self, namespace: &str, name: &str) -> String {
        let profile = self.profile();
        format!(
            "{}{}{}{}",
            profile.type_prefix,
            self.names.type_name(namespace),
            profile.type_separator,
            self.names.type_name(name)
        )
    }

    fn primitive_spelling(&self, kind: PrimitiveKind) -> String {
        self.profile().primitive(kind).map_or_else(
            || {
                debug!(kind = kind.key(), "primitive kind not mapped by profile, using its name");
                self.names.type_name(kind.name())
            },
            str::to_string,
        )
    }

    fn primitive_serializer(&self, kind: PrimitiveKind) -> String {
        self.profile()
            .serializer(kind)
            .map_or_else(|| self.names.type_name(kind.name()), str::to_string)
    }
}

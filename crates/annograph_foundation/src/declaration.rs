//! Annotated declarations: the raw input to schema construction.
//!
//! A [`Declaration`] is a named class, interface, or enum together with its
//! members and annotation metadata. Hosts build these from whatever static
//! type information they have; the processor only reads them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::schema::DirectiveLocation;
use crate::value::Value;
use crate::value_type::ValueType;

// =============================================================================
// Annotations
// =============================================================================

/// Annotation metadata attached to a declaration, member, or parameter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotations {
    /// Schema name override.
    pub name: Option<String>,
    /// Schema description.
    pub description: Option<String>,
    /// Marks a member as a schema field.
    pub field: bool,
    /// Excludes a member from the schema even if otherwise eligible.
    pub ignore: bool,
    /// Wraps the resolved type in a non-null modifier.
    pub non_null: bool,
    /// Maps the member to the built-in `ID` scalar.
    pub id: bool,
    /// Deprecation reason.
    pub deprecated: Option<String>,
    /// User-declared data fetcher.
    pub data_fetcher: Option<DataFetcherRef>,
    /// Directives applied to the annotated element.
    pub directives: Vec<DirectiveUse>,
    /// Marks a declaration or method as a directive definition.
    pub directive_definition: Option<DirectiveDefinitionMarker>,
    /// Marks a declaration as an extension of the named base declaration.
    pub type_extension: Option<String>,
    /// Type resolver reference for interfaces.
    pub type_resolver: Option<String>,
    /// Default value for arguments and directive arguments.
    pub default_value: Option<Value>,
}

impl Annotations {
    /// Creates empty annotations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing is annotated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Reference to a user-declared data fetcher.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataFetcherRef {
    /// Fetcher identifier understood by the execution engine.
    pub fetcher: String,
    /// Constructor arguments for the fetcher.
    pub args: Vec<String>,
}

impl DataFetcherRef {
    /// Creates a fetcher reference with no arguments.
    #[must_use]
    pub fn new(fetcher: impl Into<String>) -> Self {
        Self {
            fetcher: fetcher.into(),
            args: Vec::new(),
        }
    }

    /// Adds a constructor argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// A directive applied to a type or field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectiveUse {
    /// The directive name.
    pub name: String,
    /// Argument values, in application order.
    pub arguments: Vec<(String, Value)>,
}

impl DirectiveUse {
    /// Creates a directive application with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Adds an argument value.
    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }
}

/// Marker for directive-definition declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectiveDefinitionMarker {
    /// Wiring reference consumed by the execution engine.
    pub wiring: String,
    /// Locations the directive may be applied to.
    pub locations: Vec<DirectiveLocation>,
}

// =============================================================================
// Declaration
// =============================================================================

/// What kind of host type a declaration describes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeclarationKind {
    /// A concrete class.
    Class,
    /// An interface.
    Interface,
    /// An enumeration.
    Enum(Vec<EnumValueDecl>),
}

/// One value of an enum declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValueDecl {
    /// Host name of the value.
    pub name: String,
    /// Value annotations (name override, description, deprecation).
    pub annotations: Annotations,
}

impl EnumValueDecl {
    /// Creates an unannotated enum value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Annotations::new(),
        }
    }
}

/// A named, possibly annotated type definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Declaration {
    /// Host name.
    pub name: String,
    /// Class, interface, or enum.
    pub kind: DeclarationKind,
    /// Type-level annotations.
    pub annotations: Annotations,
    /// Direct superclass, if any.
    pub superclass: Option<String>,
    /// Directly implemented interfaces, in declared order.
    pub interfaces: Vec<String>,
    /// Declared members, in declared order.
    pub members: Vec<Member>,
}

impl Declaration {
    fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            annotations: Annotations::new(),
            superclass: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Creates a class declaration.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Class)
    }

    /// Creates an interface declaration.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DeclarationKind::Interface)
    }

    /// Creates an enum declaration with unannotated values.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(EnumValueDecl::new).collect();
        Self::new(name, DeclarationKind::Enum(values))
    }

    /// Sets the superclass.
    #[must_use]
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds a member.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Replaces the type-level annotations.
    #[must_use]
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Sets the schema name override.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.annotations.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.annotations.description = Some(description.into());
        self
    }

    /// Marks this declaration as an extension of `base`.
    #[must_use]
    pub fn extension_of(mut self, base: impl Into<String>) -> Self {
        self.annotations.type_extension = Some(base.into());
        self
    }

    /// Marks this declaration as a directive definition.
    #[must_use]
    pub fn directive_definition(
        mut self,
        wiring: impl Into<String>,
        locations: Vec<DirectiveLocation>,
    ) -> Self {
        self.annotations.directive_definition = Some(DirectiveDefinitionMarker {
            wiring: wiring.into(),
            locations,
        });
        self
    }

    /// Applies a directive to this type.
    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveUse) -> Self {
        self.annotations.directives.push(directive);
        self
    }

    /// Sets the interface type resolver.
    #[must_use]
    pub fn type_resolver(mut self, resolver: impl Into<String>) -> Self {
        self.annotations.type_resolver = Some(resolver.into());
        self
    }

    /// Returns direct supertypes: superclass first, then interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.superclass
            .as_deref()
            .into_iter()
            .chain(self.interfaces.iter().map(String::as_str))
    }

    /// Returns the first member with the given host name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Returns true if this is an interface declaration.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, DeclarationKind::Interface)
    }

    /// Returns true if the declaration carries any schema annotation.
    ///
    /// Undecorated declarations are not turned into schema types; a value
    /// type naming one must be handled by a type function instead.
    #[must_use]
    pub fn is_schema_annotated(&self) -> bool {
        matches!(self.kind, DeclarationKind::Enum(_))
            || self.annotations.name.is_some()
            || self.annotations.description.is_some()
            || self.annotations.type_resolver.is_some()
            || self.members.iter().any(|m| m.annotations.field)
    }
}

// =============================================================================
// Members
// =============================================================================

/// Whether a member is a stored field or a method.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemberKind {
    /// A stored field.
    Field,
    /// A method with its parameters.
    Method {
        /// Declared parameters, in order.
        parameters: Vec<Parameter>,
    },
}

/// A field or method of a declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Member {
    /// Host name.
    pub name: String,
    /// Field or method.
    pub kind: MemberKind,
    /// Declared value (or return) type.
    pub value_type: ValueType,
    /// Member annotations.
    pub annotations: Annotations,
    /// Compiler-generated member that never reaches the schema.
    pub synthetic: bool,
}

impl Member {
    /// Creates a stored field.
    #[must_use]
    pub fn field(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            value_type,
            annotations: Annotations::new(),
            synthetic: false,
        }
    }

    /// Creates a method with no parameters.
    #[must_use]
    pub fn method(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method {
                parameters: Vec::new(),
            },
            value_type,
            annotations: Annotations::new(),
            synthetic: false,
        }
    }

    /// Adds a parameter. Has no effect on stored fields.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        if let MemberKind::Method { parameters } = &mut self.kind {
            parameters.push(parameter);
        }
        self
    }

    /// Marks this member as a schema field.
    #[must_use]
    pub fn graphql_field(mut self) -> Self {
        self.annotations.field = true;
        self
    }

    /// Sets the schema name override.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.annotations.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.annotations.description = Some(description.into());
        self
    }

    /// Marks the resolved type non-null.
    #[must_use]
    pub fn non_null(mut self) -> Self {
        self.annotations.non_null = true;
        self
    }

    /// Maps the member to the `ID` scalar.
    #[must_use]
    pub fn id(mut self) -> Self {
        self.annotations.id = true;
        self
    }

    /// Excludes the member from the schema.
    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.annotations.ignore = true;
        self
    }

    /// Marks the member deprecated.
    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.annotations.deprecated = Some(reason.into());
        self
    }

    /// Attaches a user-declared data fetcher.
    #[must_use]
    pub fn data_fetcher(mut self, fetcher: DataFetcherRef) -> Self {
        self.annotations.data_fetcher = Some(fetcher);
        self
    }

    /// Applies a directive to this member.
    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveUse) -> Self {
        self.annotations.directives.push(directive);
        self
    }

    /// Sets a default value (used for directive arguments).
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.annotations.default_value = Some(value.into());
        self
    }

    /// Marks this method as a directive definition.
    #[must_use]
    pub fn directive_definition(
        mut self,
        wiring: impl Into<String>,
        locations: Vec<DirectiveLocation>,
    ) -> Self {
        self.annotations.directive_definition = Some(DirectiveDefinitionMarker {
            wiring: wiring.into(),
            locations,
        });
        self
    }

    /// Flags the member as compiler-generated.
    #[must_use]
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Returns true for methods.
    #[must_use]
    pub const fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    /// Returns the parameters (empty for stored fields).
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        match &self.kind {
            MemberKind::Method { parameters } => parameters,
            MemberKind::Field => &[],
        }
    }

    /// Returns the override-matching key: name plus parameter types.
    #[must_use]
    pub fn signature_key(&self) -> String {
        let params: Vec<String> = self
            .parameters()
            .iter()
            .map(|p| p.value_type.to_string())
            .collect();
        format!("{}({})", self.name, params.join(","))
    }
}

/// A method parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    /// Host name.
    pub name: String,
    /// Declared type.
    pub value_type: ValueType,
    /// Parameter annotations.
    pub annotations: Annotations,
}

impl Parameter {
    /// Creates an unannotated parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            annotations: Annotations::new(),
        }
    }

    /// Sets the schema name override.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.annotations.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.annotations.description = Some(description.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.annotations.default_value = Some(value.into());
        self
    }

    /// Marks the argument non-null.
    #[must_use]
    pub fn non_null(mut self) -> Self {
        self.annotations.non_null = true;
        self
    }
}

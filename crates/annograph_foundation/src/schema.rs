//! Resolved GraphQL schema types.
//!
//! These are the nodes handed to an execution engine. Fields refer to other
//! types by name through [`TypeRef`], so recursive type graphs need no pointer
//! cycles: a self-referential field simply names its own type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Scalars every schema provides without registration.
pub const BUILTIN_SCALARS: &[&str] = &["String", "Boolean", "Int", "Float", "ID", "Long"];

// =============================================================================
// Type References
// =============================================================================

/// A reference to a schema type, possibly wrapped in list/non-null modifiers.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeRef {
    /// A named type.
    Named(String),
    /// A list of the inner type.
    List(Box<TypeRef>),
    /// A non-null modifier around the inner type.
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a named reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps `inner` in a list.
    #[must_use]
    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wraps `inner` in a non-null modifier. Already non-null types are
    /// returned unchanged.
    #[must_use]
    pub fn non_null(inner: TypeRef) -> Self {
        match inner {
            Self::NonNull(_) => inner,
            other => Self::NonNull(Box::new(other)),
        }
    }

    /// Strips an outer non-null modifier.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            Self::NonNull(inner) => *inner,
            other => other,
        }
    }

    /// Returns true if the outermost modifier is non-null.
    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Returns the innermost type name.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.base_name(),
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner:?}]"),
            Self::NonNull(inner) => write!(f, "{inner:?}!"),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// Fields and Arguments
// =============================================================================

/// How a field's value is produced at query time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fetcher {
    /// Read a stored field off the source instance.
    Property {
        /// Host member name.
        member: String,
    },
    /// Invoke a method on the source instance.
    Method {
        /// Host member name.
        member: String,
    },
    /// A user-declared fetcher.
    Custom {
        /// Fetcher identifier.
        fetcher: String,
        /// Constructor arguments.
        args: Vec<String>,
    },
    /// Construct the extension around the source, then run `inner` on it.
    Extension {
        /// Extension declaration name.
        extension: String,
        /// Fetcher executed against the extension instance.
        inner: Box<Fetcher>,
    },
}

/// A directive applied to a schema element.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AppliedDirective {
    /// Directive name.
    pub name: String,
    /// Argument values.
    pub arguments: Vec<(String, Value)>,
}

/// An argument, input field, or directive argument.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArgumentDefinition {
    /// Schema name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Input type.
    pub ty: TypeRef,
    /// Default value.
    pub default_value: Option<Value>,
}

/// A field of an object or interface type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDefinition {
    /// Schema name (unique within the owning type).
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Output type.
    pub ty: TypeRef,
    /// Arguments, in declared order.
    pub arguments: Vec<ArgumentDefinition>,
    /// Resolver descriptor.
    pub fetcher: Fetcher,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
    /// Deprecation reason.
    pub deprecation: Option<String>,
}

impl FieldDefinition {
    /// Returns the argument with the given name.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

// =============================================================================
// Schema Types
// =============================================================================

/// An object type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectType {
    /// Schema name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Fields, in resolution order.
    pub fields: Vec<FieldDefinition>,
    /// Names of implemented interfaces.
    pub interfaces: Vec<String>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// An interface type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterfaceType {
    /// Schema name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Fields, in resolution order.
    pub fields: Vec<FieldDefinition>,
    /// Type resolver reference.
    pub type_resolver: Option<String>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// An input object type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputObjectType {
    /// Schema name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Input fields.
    pub fields: Vec<ArgumentDefinition>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// One value of an enum type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValueDefinition {
    /// Schema name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Deprecation reason.
    pub deprecation: Option<String>,
}

/// An enum type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumType {
    /// Schema name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Values, in declared order.
    pub values: Vec<EnumValueDefinition>,
    /// Applied directives.
    pub directives: Vec<AppliedDirective>,
}

/// A custom scalar published by a type function.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarType {
    /// Schema name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

impl ScalarType {
    /// Creates a scalar with no description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// A resolved schema type node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SchemaType {
    /// Object type.
    Object(ObjectType),
    /// Interface type.
    Interface(InterfaceType),
    /// Input object type.
    InputObject(InputObjectType),
    /// Enum type.
    Enum(EnumType),
    /// Custom scalar.
    Scalar(ScalarType),
}

impl SchemaType {
    /// Returns the schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::InputObject(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::Scalar(t) => &t.name,
        }
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Object(t) => t.description.as_deref(),
            Self::Interface(t) => t.description.as_deref(),
            Self::InputObject(t) => t.description.as_deref(),
            Self::Enum(t) => t.description.as_deref(),
            Self::Scalar(t) => t.description.as_deref(),
        }
    }

    /// Returns the output fields (empty for non-output types).
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        match self {
            Self::Object(t) => &t.fields,
            Self::Interface(t) => &t.fields,
            _ => &[],
        }
    }

    /// Returns the output field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Returns the object type, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the interface type, if this is one.
    #[must_use]
    pub fn as_interface(&self) -> Option<&InterfaceType> {
        match self {
            Self::Interface(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the input object type, if this is one.
    #[must_use]
    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            Self::InputObject(t) => Some(t),
            _ => None,
        }
    }

    /// Returns true if the type may appear in input positions.
    #[must_use]
    pub const fn is_input_type(&self) -> bool {
        matches!(self, Self::InputObject(_) | Self::Enum(_) | Self::Scalar(_))
    }

    /// Short kind label for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Interface(_) => "interface",
            Self::InputObject(_) => "input object",
            Self::Enum(_) => "enum",
            Self::Scalar(_) => "scalar",
        }
    }
}

// =============================================================================
// Directives
// =============================================================================

/// Where a directive may be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DirectiveLocation {
    /// Query operation.
    Query,
    /// Mutation operation.
    Mutation,
    /// Subscription operation.
    Subscription,
    /// Field selection.
    Field,
    /// Fragment definition.
    FragmentDefinition,
    /// Fragment spread.
    FragmentSpread,
    /// Inline fragment.
    InlineFragment,
    /// Schema definition.
    Schema,
    /// Scalar definition.
    Scalar,
    /// Object definition.
    Object,
    /// Field definition.
    FieldDefinition,
    /// Argument definition.
    ArgumentDefinition,
    /// Interface definition.
    Interface,
    /// Union definition.
    Union,
    /// Enum definition.
    Enum,
    /// Enum value definition.
    EnumValue,
    /// Input object definition.
    InputObject,
    /// Input field definition.
    InputFieldDefinition,
}

/// A directive definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectiveDefinition {
    /// Directive name (without `@`).
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Valid locations.
    pub locations: Vec<DirectiveLocation>,
    /// Arguments.
    pub arguments: Vec<ArgumentDefinition>,
}

/// A directive definition paired with its wiring reference.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectiveAndWiring {
    /// The directive.
    pub directive: DirectiveDefinition,
    /// Wiring reference consumed by the execution engine.
    pub wiring: String,
}

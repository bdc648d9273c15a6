//! Static shape of a declared member type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The declared type of a member, parameter, or directive argument.
///
/// Wrapper shapes are explicit so list and non-null modifiers can be derived
/// without runtime information:
/// - `List(T)` - collections and arrays
/// - `Optional(T)` - explicitly nullable wrapper
/// - `NonNull(T)` - a type that can never be null
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueType {
    /// A named type: a primitive (`String`, `i32`, ...) or a declaration.
    Named(String),
    /// Homogeneous collection.
    List(Box<ValueType>),
    /// Nullable wrapper.
    Optional(Box<ValueType>),
    /// Non-nullable wrapper.
    NonNull(Box<ValueType>),
}

impl ValueType {
    /// Creates a named type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: ValueType) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates an optional type.
    #[must_use]
    pub fn optional(inner: ValueType) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Creates a non-null type.
    #[must_use]
    pub fn non_null(inner: ValueType) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Returns the innermost named type.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::Optional(inner) | Self::NonNull(inner) => inner.base_name(),
        }
    }

    /// Returns the name if this is an unwrapped named type.
    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(t) => write!(f, "List<{t:?}>"),
            Self::Optional(t) => write!(f, "Optional<{t:?}>"),
            Self::NonNull(t) => write!(f, "NonNull<{t:?}>"),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

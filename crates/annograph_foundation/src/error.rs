//! Error types for schema construction.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The error raised when a schema type cannot be built.
///
/// Every failure carries the name of the offending declaration (and member,
/// when one is involved) so the caller can point at the source of the problem.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct SchemaBuildError {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl SchemaBuildError {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a resolution frame, creating the context if needed.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates an error for a directive requested on an unmarked declaration.
    #[must_use]
    pub fn not_directive_definition(declaration: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotDirectiveDefinition {
            declaration: declaration.into(),
        })
    }

    /// Creates an error for a value type that no rule can map.
    #[must_use]
    pub fn unresolvable_type(
        declaration: impl Into<String>,
        member: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Self {
        let declaration = declaration.into();
        let member = member.into();
        Self::new(ErrorKind::UnresolvableType {
            declaration: declaration.clone(),
            member: member.clone(),
            value_type: value_type.into(),
        })
        .with_context(
            ErrorContext::new()
                .with_declaration(declaration)
                .with_member(member),
        )
    }

    /// Creates an unknown declaration error.
    #[must_use]
    pub fn unknown_declaration(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDeclaration(name.into()))
    }

    /// Creates an error for an extension registration without the marker.
    #[must_use]
    pub fn not_type_extension(declaration: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotTypeExtension {
            declaration: declaration.into(),
        })
    }

    /// Creates an error for a directive argument of an output type.
    #[must_use]
    pub fn invalid_directive_argument(
        directive: impl Into<String>,
        argument: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidDirectiveArgument {
            directive: directive.into(),
            argument: argument.into(),
            type_name: type_name.into(),
        })
    }

    /// Creates an error for a directive applied before it was defined.
    #[must_use]
    pub fn unknown_directive(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDirective {
            name: name.into(),
            target: target.into(),
        })
    }

    /// Creates a name collision error.
    #[must_use]
    pub fn name_collision(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::NameCollision {
            scope: scope.into(),
            name: name.into(),
        })
    }

    /// Returns the name of the declaration this error is about, if known.
    #[must_use]
    pub fn declaration(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::NotDirectiveDefinition { declaration }
            | ErrorKind::UnresolvableType { declaration, .. }
            | ErrorKind::NotTypeExtension { declaration } => Some(declaration),
            ErrorKind::UnknownDeclaration(name) => Some(name),
            _ => self
                .context
                .as_ref()
                .and_then(|ctx| ctx.declaration.as_deref()),
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A directive was requested from a declaration lacking the marker.
    #[error("the supplied declaration {declaration} is not annotated as a directive definition")]
    NotDirectiveDefinition {
        /// The offending declaration.
        declaration: String,
    },

    /// No type function or declaration maps the value type.
    #[error("cannot resolve type {value_type} of member {member} on {declaration}")]
    UnresolvableType {
        /// The declaring type.
        declaration: String,
        /// The member whose type failed to resolve.
        member: String,
        /// Rendered value type.
        value_type: String,
    },

    /// A referenced declaration is not known to the declaration source.
    #[error("unknown declaration: {0}")]
    UnknownDeclaration(String),

    /// An extension was registered without naming a base type.
    #[error("declaration {declaration} is not annotated as a type extension")]
    NotTypeExtension {
        /// The offending declaration.
        declaration: String,
    },

    /// A directive argument resolved to an output-only type.
    #[error("argument {argument} of directive {directive} has output type {type_name}")]
    InvalidDirectiveArgument {
        /// The directive being built.
        directive: String,
        /// The argument name.
        argument: String,
        /// The offending type name.
        type_name: String,
    },

    /// A directive was applied that is not in the directive registry.
    #[error("unknown directive @{name} applied to {target}")]
    UnknownDirective {
        /// The directive name.
        name: String,
        /// The type or field the directive was applied to.
        target: String,
    },

    /// Two definitions claimed the same name under the rejecting policy.
    #[error("name collision in {scope}: {name}")]
    NameCollision {
        /// Where the collision happened (e.g. `directive registry`).
        scope: String,
        /// The colliding name.
        name: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The declaration being processed.
    pub declaration: Option<String>,
    /// The member being processed.
    pub member: Option<String>,
    /// Resolution chain, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the declaration name.
    #[must_use]
    pub fn with_declaration(mut self, declaration: impl Into<String>) -> Self {
        self.declaration = Some(declaration.into());
        self
    }

    /// Sets the member name.
    #[must_use]
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(declaration) = &self.declaration {
            write!(f, "at {declaration}")?;
            if let Some(member) = &self.member {
                write!(f, ".{member}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

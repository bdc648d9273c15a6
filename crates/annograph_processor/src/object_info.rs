//! Type-level metadata extracted from declarations.

use annograph_foundation::{Declaration, DeclarationKind, to_graphql_name};

/// Schema name and description of a declaration.
#[derive(Clone, Debug)]
pub struct ObjectInfo {
    /// Normalized schema name.
    pub name: String,
    /// Description annotation.
    pub description: Option<String>,
}

/// Reads names and descriptions off declarations.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectInfoRetriever;

impl ObjectInfoRetriever {
    /// Returns the schema name: the name annotation or the host name, normalized.
    #[must_use]
    pub fn type_name(&self, decl: &Declaration) -> String {
        to_graphql_name(decl.annotations.name.as_deref().unwrap_or(&decl.name))
    }

    /// Returns the schema name used in input positions.
    ///
    /// Enums are shared between input and output positions and keep their
    /// name; everything else is prefixed.
    #[must_use]
    pub fn input_type_name(&self, decl: &Declaration, prefix: &str) -> String {
        let name = self.type_name(decl);
        match decl.kind {
            DeclarationKind::Enum(_) => name,
            _ => to_graphql_name(&format!("{prefix}{name}")),
        }
    }

    /// Extracts the type-level metadata.
    #[must_use]
    pub fn retrieve(&self, decl: &Declaration) -> ObjectInfo {
        ObjectInfo {
            name: self.type_name(decl),
            description: decl.annotations.description.clone(),
        }
    }
}

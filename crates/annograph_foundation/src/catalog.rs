//! Declaration lookup.
//!
//! The processor never walks host reflection data directly. It asks a
//! [`DeclarationSource`] for declarations by name and derives inheritance
//! levels from the supertypes each declaration names.

use std::collections::{HashMap, HashSet};

use crate::declaration::Declaration;

/// Capability for looking up declarations by host name.
pub trait DeclarationSource {
    /// Returns the declaration with the given host name.
    fn declaration(&self, name: &str) -> Option<&Declaration>;

    /// Returns the inheritance hierarchy breadth-first, one level per entry.
    ///
    /// Level 0 is `decl` itself; level `n + 1` holds the direct supertypes
    /// (superclass first, then interfaces) of every declaration at level `n`.
    /// Each declaration appears once, at its nearest level. Supertypes the
    /// source does not know are skipped.
    fn hierarchy_levels<'a>(&'a self, decl: &'a Declaration) -> Vec<Vec<&'a Declaration>> {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(decl.name.as_str());

        let mut levels = vec![vec![decl]];
        loop {
            let mut next = Vec::new();
            for &current in levels.last().into_iter().flatten() {
                for name in current.supertypes() {
                    if !visited.insert(name) {
                        continue;
                    }
                    if let Some(parent) = self.declaration(name) {
                        next.push(parent);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            levels.push(next);
        }
        levels
    }

    /// Returns true if `decl` is annotated itself or inherits a field-marked
    /// member from any supertype.
    fn is_schema_type(&self, decl: &Declaration) -> bool {
        decl.is_schema_annotated()
            || self
                .hierarchy_levels(decl)
                .into_iter()
                .skip(1)
                .flatten()
                .any(|ancestor| ancestor.members.iter().any(|m| m.annotations.field))
    }

    /// Returns `decl` followed by its superclass chain, nearest first.
    fn superclass_chain<'a>(&'a self, decl: &'a Declaration) -> Vec<&'a Declaration> {
        let mut chain = vec![decl];
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(decl.name.as_str());

        let mut current = decl;
        while let Some(parent) = current
            .superclass
            .as_deref()
            .filter(|name| seen.insert(*name))
            .and_then(|name| self.declaration(name))
        {
            chain.push(parent);
            current = parent;
        }
        chain
    }
}

impl<T: DeclarationSource + ?Sized> DeclarationSource for &T {
    fn declaration(&self, name: &str) -> Option<&Declaration> {
        (**self).declaration(name)
    }
}

/// An in-memory set of declarations keyed by host name.
#[derive(Clone, Debug, Default)]
pub struct DeclarationCatalog {
    declarations: HashMap<String, Declaration>,
}

impl DeclarationCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, returning the one it replaced.
    pub fn insert(&mut self, declaration: Declaration) -> Option<Declaration> {
        self.declarations
            .insert(declaration.name.clone(), declaration)
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, declaration: Declaration) -> Self {
        self.insert(declaration);
        self
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Returns all host names.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.declarations.keys().map(String::as_str).collect()
    }
}

impl DeclarationSource for DeclarationCatalog {
    fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }
}

impl FromIterator<Declaration> for DeclarationCatalog {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for declaration in iter {
            catalog.insert(declaration);
        }
        catalog
    }
}

//! Member search over a declaration's inheritance hierarchy.
//!
//! Two strategies decide which members reach the schema:
//! - [`BreadthFirstSearch`] collects methods across every supertype and
//!   interface, level by level, so an override in a subtype suppresses the
//!   inherited declaration with the same signature.
//! - [`ParentalSearch`] collects stored fields along the superclass chain,
//!   where the most-derived declaration of a name wins.
//!
//! In both, the nearest declaration of a key is the one returned, and it
//! qualifies if it or any declaration it overrides carries the field marker.
//! Ignored and synthetic members never qualify.

use std::collections::HashMap;

use annograph_foundation::{Declaration, DeclarationSource, Member};

/// A strategy for selecting the schema-eligible members of a declaration.
pub trait SearchAlgorithm {
    /// Returns the qualifying members, nearest declarations first.
    fn search<'a>(&self, decl: &'a Declaration, source: &'a dyn DeclarationSource)
    -> Vec<&'a Member>;
}

/// Nearest-wins selection with inherited field markers.
#[derive(Default)]
struct Selection<'a> {
    order: Vec<String>,
    chosen: HashMap<String, (&'a Member, bool)>,
}

impl<'a> Selection<'a> {
    fn offer(&mut self, key: String, member: &'a Member) {
        match self.chosen.get_mut(&key) {
            Some((_, marked)) => *marked |= member.annotations.field,
            None => {
                self.chosen
                    .insert(key.clone(), (member, member.annotations.field));
                self.order.push(key);
            }
        }
    }

    fn finish(mut self) -> Vec<&'a Member> {
        self.order
            .iter()
            .filter_map(|key| self.chosen.remove(key))
            .filter(|(member, marked)| *marked && !member.annotations.ignore && !member.synthetic)
            .map(|(member, _)| member)
            .collect()
    }
}

/// Breadth-first method search across supertypes and interfaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSearch;

impl SearchAlgorithm for BreadthFirstSearch {
    fn search<'a>(
        &self,
        decl: &'a Declaration,
        source: &'a dyn DeclarationSource,
    ) -> Vec<&'a Member> {
        let mut selection = Selection::default();
        for level in source.hierarchy_levels(decl) {
            for ancestor in level {
                for member in ancestor.members.iter().filter(|m| m.is_method()) {
                    selection.offer(member.signature_key(), member);
                }
            }
        }
        selection.finish()
    }
}

/// Superclass-chain field search.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParentalSearch;

impl SearchAlgorithm for ParentalSearch {
    fn search<'a>(
        &self,
        decl: &'a Declaration,
        source: &'a dyn DeclarationSource,
    ) -> Vec<&'a Member> {
        let mut selection = Selection::default();
        for ancestor in source.superclass_chain(decl) {
            for member in ancestor.members.iter().filter(|m| !m.is_method()) {
                selection.offer(member.name.clone(), member);
            }
        }
        selection.finish()
    }
}

//! Directive definitions and applied directives.
//!
//! A directive is defined either by a whole declaration (each stored field is
//! an argument) or by a single method (each parameter is an argument). Built
//! directives are kept in the session's [`DirectiveRegistry`] together with
//! their wiring reference.

use std::collections::HashMap;

use annograph_foundation::{
    Annotations, AppliedDirective, ArgumentDefinition, Declaration, DirectiveAndWiring,
    DirectiveDefinition, Member, Result, SchemaBuildError, TypeRef, to_graphql_name,
};

use crate::config::OnCollision;
use crate::container::BuildContext;
use crate::field::{DeclarationResolver, FieldRetriever};
use crate::type_function::AnnotationContext;

// =============================================================================
// DirectiveRegistry
// =============================================================================

/// Directive definitions keyed by name.
#[derive(Clone, Debug, Default)]
pub struct DirectiveRegistry {
    directives: HashMap<String, DirectiveAndWiring>,
}

impl DirectiveRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a directive, returning the definition it replaced.
    ///
    /// # Errors
    ///
    /// Returns a name collision error under [`OnCollision::Error`] if the
    /// name is already registered.
    pub fn register(
        &mut self,
        entry: DirectiveAndWiring,
        on_collision: OnCollision,
    ) -> Result<Option<DirectiveAndWiring>> {
        let name = entry.directive.name.clone();
        if on_collision == OnCollision::Error && self.directives.contains_key(&name) {
            return Err(SchemaBuildError::name_collision("directive registry", name));
        }
        tracing::debug!(directive = %name, wiring = %entry.wiring, "registering directive");
        Ok(self.directives.insert(name, entry))
    }

    /// Returns the directive with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DirectiveAndWiring> {
        self.directives.get(name)
    }

    /// Returns true if a directive with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    /// Returns the number of registered directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns true if no directives are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Returns all registered directives, sorted by name.
    #[must_use]
    pub fn entries(&self) -> Vec<&DirectiveAndWiring> {
        let mut entries: Vec<_> = self.directives.values().collect();
        entries.sort_by(|a, b| a.directive.name.cmp(&b.directive.name));
        entries
    }
}

// =============================================================================
// DirectiveCreator
// =============================================================================

/// Builds directive definitions from marked declarations and methods.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectiveCreator {
    fields: FieldRetriever,
}

impl DirectiveCreator {
    /// Builds and registers the directive defined by `decl`.
    ///
    /// # Errors
    ///
    /// Returns an error if `decl` lacks the directive-definition marker, if
    /// an argument type cannot be resolved or is an output type, or if the
    /// name collides under [`OnCollision::Error`].
    pub fn build_directive(
        &self,
        decl: &Declaration,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<DirectiveDefinition> {
        let Some(marker) = &decl.annotations.directive_definition else {
            return Err(SchemaBuildError::not_directive_definition(&decl.name));
        };

        let name = to_graphql_name(decl.annotations.name.as_deref().unwrap_or(&decl.name));
        let mut arguments = Vec::new();
        for member in decl
            .members
            .iter()
            .filter(|m| !m.is_method() && !m.synthetic && !m.annotations.ignore)
        {
            arguments.push(self.build_argument(&name, decl, member, cx, types)?);
        }

        let directive = DirectiveDefinition {
            name,
            description: decl.annotations.description.clone(),
            locations: marker.locations.clone(),
            arguments,
        };
        let on_collision = cx.config.on_collision;
        cx.container.directives_mut().register(
            DirectiveAndWiring {
                directive: directive.clone(),
                wiring: marker.wiring.clone(),
            },
            on_collision,
        )?;
        Ok(directive)
    }

    /// Builds and registers the directive defined by a method of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the method lacks the directive-definition marker,
    /// if a parameter type cannot be resolved or is an output type, or if the
    /// name collides under [`OnCollision::Error`].
    pub fn build_directive_from_method(
        &self,
        owner: &Declaration,
        method: &Member,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<DirectiveAndWiring> {
        let Some(marker) = &method.annotations.directive_definition else {
            return Err(SchemaBuildError::not_directive_definition(format!(
                "{}.{}",
                owner.name, method.name
            )));
        };

        let name = to_graphql_name(method.annotations.name.as_deref().unwrap_or(&method.name));
        let mut arguments = Vec::with_capacity(method.parameters().len());
        for parameter in method.parameters() {
            let argument = self
                .fields
                .build_argument(owner, method, parameter, cx, types)?;
            check_input_type(&name, &argument, cx)?;
            arguments.push(argument);
        }

        let entry = DirectiveAndWiring {
            directive: DirectiveDefinition {
                name,
                description: method.annotations.description.clone(),
                locations: marker.locations.clone(),
                arguments,
            },
            wiring: marker.wiring.clone(),
        };
        let on_collision = cx.config.on_collision;
        cx.container
            .directives_mut()
            .register(entry.clone(), on_collision)?;
        Ok(entry)
    }

    /// Builds every directive defined by the marked methods of `decl`.
    ///
    /// # Errors
    ///
    /// Returns the first directive creation error.
    pub fn directives(
        &self,
        decl: &Declaration,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<Vec<DirectiveDefinition>> {
        let mut built = Vec::new();
        for method in decl
            .members
            .iter()
            .filter(|m| m.is_method() && m.annotations.directive_definition.is_some())
        {
            built.push(
                self.build_directive_from_method(decl, method, cx, types)?
                    .directive,
            );
        }
        Ok(built)
    }

    fn build_argument(
        &self,
        directive: &str,
        decl: &Declaration,
        member: &Member,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<ArgumentDefinition> {
        let ctx = AnnotationContext::input(&member.annotations, &decl.name, &member.name);
        let mut ty = self
            .fields
            .resolve_value_type(&member.value_type, &ctx, cx, types)?;
        if member.annotations.non_null {
            ty = TypeRef::non_null(ty);
        }
        let argument = ArgumentDefinition {
            name: self.fields.field_name(member, false),
            description: member.annotations.description.clone(),
            ty,
            default_value: member.annotations.default_value.clone(),
        };
        check_input_type(directive, &argument, cx)?;
        Ok(argument)
    }
}

/// Rejects directive arguments whose type is an object or interface.
fn check_input_type(
    directive: &str,
    argument: &ArgumentDefinition,
    cx: &BuildContext<'_>,
) -> Result<()> {
    let base = argument.ty.base_name();
    match cx.container.lookup(base) {
        Some(node) if !node.is_input_type() => Err(SchemaBuildError::invalid_directive_argument(
            directive,
            &argument.name,
            base,
        )),
        _ => Ok(()),
    }
}

/// Converts the directives applied in `annotations` into schema form.
///
/// With validation enabled every applied directive must already be in the
/// directive registry.
///
/// # Errors
///
/// Returns an unknown directive error naming `target` when validation is on
/// and a directive is missing.
pub fn applied_directives(
    annotations: &Annotations,
    target: &str,
    cx: &BuildContext<'_>,
) -> Result<Vec<AppliedDirective>> {
    let mut applied = Vec::with_capacity(annotations.directives.len());
    for directive in &annotations.directives {
        if cx.config.validate_applied_directives && !cx.container.directives().contains(&directive.name) {
            return Err(SchemaBuildError::unknown_directive(&directive.name, target));
        }
        applied.push(AppliedDirective {
            name: directive.name.clone(),
            arguments: directive.arguments.clone(),
        });
    }
    Ok(applied)
}

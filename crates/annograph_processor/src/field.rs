//! Field retrieval: turning one qualifying member into a schema field.

use std::collections::HashSet;
use std::sync::Arc;

use annograph_foundation::{
    ArgumentDefinition, Declaration, DeclarationSource, FieldDefinition, Member, Parameter, Result,
    SchemaBuildError, SchemaType, TypeRef, ValueType, strip_accessor_prefix, to_graphql_name,
};

use crate::container::BuildContext;
use crate::directive::applied_directives;
use crate::fetcher;
use crate::search::{BreadthFirstSearch, ParentalSearch, SearchAlgorithm};
use crate::type_function::AnnotationContext;

/// Resolves value types that name schema-annotated declarations.
///
/// Implemented by the type retriever; the field retriever calls back into it
/// for every member whose type is itself a declaration.
pub trait DeclarationResolver {
    /// Resolves the declaration named `name` in an input or output position.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration or anything it references fails
    /// to resolve.
    fn resolve_declaration(
        &self,
        name: &str,
        input: bool,
        cx: &mut BuildContext<'_>,
    ) -> Result<Arc<SchemaType>>;
}

// =============================================================================
// FieldRetriever
// =============================================================================

/// Builds field, input field, and argument definitions from members.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldRetriever;

impl FieldRetriever {
    /// Returns the schema name of a member.
    #[must_use]
    pub fn field_name(&self, member: &Member, strip_accessors: bool) -> String {
        if let Some(name) = &member.annotations.name {
            return to_graphql_name(name);
        }
        if member.is_method() && strip_accessors {
            to_graphql_name(&strip_accessor_prefix(&member.name))
        } else {
            to_graphql_name(&member.name)
        }
    }

    /// Builds an output field from a member of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the member's type, an argument type, or an applied
    /// directive cannot be resolved.
    pub fn build_field(
        &self,
        owner: &Declaration,
        member: &Member,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<FieldDefinition> {
        let name = self.field_name(member, cx.config.strip_accessor_prefixes);
        let ctx = AnnotationContext::output(&member.annotations, &owner.name, &member.name);
        let mut ty = self.resolve_value_type(&member.value_type, &ctx, cx, types)?;
        if member.annotations.non_null {
            ty = TypeRef::non_null(ty);
        }

        let mut arguments = Vec::with_capacity(member.parameters().len());
        for parameter in member.parameters() {
            arguments.push(self.build_argument(owner, member, parameter, cx, types)?);
        }

        let target = format!("{}.{name}", owner.name);
        let directives = applied_directives(&member.annotations, &target, cx)?;

        Ok(FieldDefinition {
            name,
            description: member.annotations.description.clone(),
            ty,
            arguments,
            fetcher: fetcher::construct(member),
            directives,
            deprecation: member.annotations.deprecated.clone(),
        })
    }

    /// Builds an input field from a member of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the member's type cannot be resolved in an input
    /// position.
    pub fn build_input_field(
        &self,
        owner: &Declaration,
        member: &Member,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<ArgumentDefinition> {
        let name = self.field_name(member, cx.config.strip_accessor_prefixes);
        let ctx = AnnotationContext::input(&member.annotations, &owner.name, &member.name);
        let mut ty = self.resolve_value_type(&member.value_type, &ctx, cx, types)?;
        if member.annotations.non_null {
            ty = TypeRef::non_null(ty);
        }

        Ok(ArgumentDefinition {
            name,
            description: member.annotations.description.clone(),
            ty,
            default_value: member.annotations.default_value.clone(),
        })
    }

    /// Builds an argument from a method parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter type cannot be resolved in an input
    /// position.
    pub fn build_argument(
        &self,
        owner: &Declaration,
        member: &Member,
        parameter: &Parameter,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<ArgumentDefinition> {
        let name = to_graphql_name(
            parameter
                .annotations
                .name
                .as_deref()
                .unwrap_or(&parameter.name),
        );
        let path = format!("{}.{}", member.name, parameter.name);
        let ctx = AnnotationContext::input(&parameter.annotations, &owner.name, &path);
        let mut ty = self.resolve_value_type(&parameter.value_type, &ctx, cx, types)?;
        if parameter.annotations.non_null {
            ty = TypeRef::non_null(ty);
        }

        Ok(ArgumentDefinition {
            name,
            description: parameter.annotations.description.clone(),
            ty,
            default_value: parameter.annotations.default_value.clone(),
        })
    }

    /// Resolves a declared value type to a schema type reference.
    ///
    /// Type functions are consulted first, custom rules ahead of the default
    /// table. Unclaimed wrappers are peeled and their element resolved, then
    /// re-wrapped. An unclaimed named type must be a declaration that is
    /// annotated or inherits field markers, which is resolved through `types`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the declaring type and member if no rule and
    /// no declaration can produce the type.
    pub fn resolve_value_type(
        &self,
        value_type: &ValueType,
        ctx: &AnnotationContext<'_>,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<TypeRef> {
        if let Some(mapped) = cx.container.map_type(value_type, ctx) {
            return mapped;
        }

        match value_type {
            ValueType::NonNull(inner) => Ok(TypeRef::non_null(
                self.resolve_value_type(inner, ctx, cx, types)?,
            )),
            ValueType::List(inner) => Ok(TypeRef::list(
                self.resolve_value_type(inner, ctx, cx, types)?,
            )),
            ValueType::Optional(inner) => Ok(self
                .resolve_value_type(inner, ctx, cx, types)?
                .nullable()),
            ValueType::Named(name) => {
                let source = cx.source;
                match source.declaration(name) {
                    Some(decl) if source.is_schema_type(decl) => {
                        let node = types.resolve_declaration(name, ctx.input, cx)?;
                        Ok(TypeRef::named(node.name()))
                    }
                    _ => Err(SchemaBuildError::unresolvable_type(
                        ctx.declaration,
                        ctx.member,
                        value_type.to_string(),
                    )),
                }
            }
        }
    }
}

// =============================================================================
// FieldCollector
// =============================================================================

/// Runs both member searches over a declaration and builds its fields.
///
/// Methods are collected first; a stored field whose schema name is already
/// taken by a method is skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldCollector {
    method_search: BreadthFirstSearch,
    field_search: ParentalSearch,
    fields: FieldRetriever,
}

impl FieldCollector {
    /// Returns the field retriever.
    #[must_use]
    pub fn retriever(&self) -> &FieldRetriever {
        &self.fields
    }

    fn qualifying_members<'a>(
        &self,
        decl: &'a Declaration,
        source: &'a dyn DeclarationSource,
    ) -> Vec<&'a Member> {
        let mut members = self.method_search.search(decl, source);
        members.extend(self.field_search.search(decl, source));
        members
    }

    /// Builds the output fields of `decl`.
    ///
    /// # Errors
    ///
    /// Returns the first field retrieval error.
    pub fn collect(
        &self,
        decl: &Declaration,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<Vec<FieldDefinition>> {
        let source = cx.source;
        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for member in self.qualifying_members(decl, source) {
            let name = self.fields.field_name(member, cx.config.strip_accessor_prefixes);
            if !seen.insert(name) {
                continue;
            }
            fields.push(self.fields.build_field(decl, member, cx, types)?);
        }
        Ok(fields)
    }

    /// Builds the input fields of `decl`.
    ///
    /// # Errors
    ///
    /// Returns the first field retrieval error.
    pub fn collect_input(
        &self,
        decl: &Declaration,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<Vec<ArgumentDefinition>> {
        let source = cx.source;
        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for member in self.qualifying_members(decl, source) {
            let name = self.fields.field_name(member, cx.config.strip_accessor_prefixes);
            if !seen.insert(name) {
                continue;
            }
            fields.push(self.fields.build_input_field(decl, member, cx, types)?);
        }
        Ok(fields)
    }
}

//! The type retriever: resolves declarations into schema type nodes.
//!
//! Resolution is depth-first and recursive. Each schema name is built at most
//! once per session:
//! - a finished type is returned from the registry as the same shared node
//! - a type still under construction is returned as its placeholder, which
//!   terminates self-referential and mutually recursive graphs
//! - anything else gets a placeholder, is built, then moved into the registry
//!
//! A failure anywhere in the graph clears both maps before it reaches the
//! caller.

use std::sync::Arc;

use annograph_foundation::{
    Declaration, DeclarationKind, EnumType, EnumValueDecl, EnumValueDefinition, InputObjectType,
    InterfaceType, ObjectType, Result, SchemaBuildError, SchemaType, to_graphql_name,
};

use crate::config::ProcessorConfig;
use crate::container::BuildContext;
use crate::directive::applied_directives;
use crate::extensions::ExtensionsHandler;
use crate::field::{DeclarationResolver, FieldCollector};
use crate::object_info::ObjectInfoRetriever;

/// Builds object, interface, input object, and enum types from declarations.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeRetriever {
    object_info: ObjectInfoRetriever,
    collector: FieldCollector,
    extensions: ExtensionsHandler,
}

impl TypeRetriever {
    /// Returns the extensions handler.
    #[must_use]
    pub fn extensions(&self) -> &ExtensionsHandler {
        &self.extensions
    }

    /// Returns the schema name `decl` resolves to in the given position.
    #[must_use]
    pub fn schema_name(&self, decl: &Declaration, input: bool, config: &ProcessorConfig) -> String {
        if input {
            self.object_info.input_type_name(decl, &config.input_prefix)
        } else {
            self.object_info.type_name(decl)
        }
    }

    /// Resolves the declaration named `name`.
    ///
    /// Returns the registered node if the type was already built in this
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration, or anything it references, cannot
    /// be resolved. The container's finished and in-flight types are cleared
    /// before the error is returned.
    pub fn retrieve(
        &self,
        name: &str,
        input: bool,
        cx: &mut BuildContext<'_>,
    ) -> Result<Arc<SchemaType>> {
        self.resolve(name, input, cx).inspect_err(|err| {
            tracing::debug!(declaration = name, error = %err, "type resolution failed");
            cx.container.reset();
        })
    }

    fn resolve(
        &self,
        name: &str,
        input: bool,
        cx: &mut BuildContext<'_>,
    ) -> Result<Arc<SchemaType>> {
        let source = cx.source;
        let decl = source
            .declaration(name)
            .ok_or_else(|| SchemaBuildError::unknown_declaration(name))?;
        let type_name = self.schema_name(decl, input, cx.config);

        if let Some(node) = cx.container.registered(&type_name) {
            tracing::trace!(schema_name = %type_name, "type registry hit");
            return Ok(node);
        }
        if let Some(placeholder) = cx.container.in_flight(&type_name) {
            tracing::debug!(schema_name = %type_name, "returning placeholder for type under construction");
            return Ok(placeholder);
        }

        tracing::debug!(declaration = name, schema_name = %type_name, input, "resolving type");
        cx.container
            .begin(type_name.clone(), placeholder(decl, &type_name, input));
        let node = self
            .build(decl, type_name.clone(), input, cx)
            .map_err(|err| err.with_frame(format!("while resolving {type_name}")))?;
        Ok(cx.container.finish(node))
    }

    fn build(
        &self,
        decl: &Declaration,
        name: String,
        input: bool,
        cx: &mut BuildContext<'_>,
    ) -> Result<SchemaType> {
        match (&decl.kind, input) {
            (DeclarationKind::Enum(values), _) => self.build_enum(decl, values, name, cx),
            (_, true) => self.build_input_object(decl, name, cx),
            (DeclarationKind::Interface, false) => self.build_interface(decl, name, cx),
            (DeclarationKind::Class, false) => self.build_object(decl, name, cx),
        }
    }

    fn build_object(
        &self,
        decl: &Declaration,
        name: String,
        cx: &mut BuildContext<'_>,
    ) -> Result<SchemaType> {
        let info = self.object_info.retrieve(decl);
        let mut fields = self.collector.collect(decl, cx, self)?;
        self.extensions
            .apply_extensions(&name, &mut fields, cx, self)?;
        let interfaces = self.interfaces(decl, cx)?;
        let directives = applied_directives(&decl.annotations, &name, cx)?;

        Ok(SchemaType::Object(ObjectType {
            name,
            description: info.description,
            fields,
            interfaces,
            directives,
        }))
    }

    fn build_interface(
        &self,
        decl: &Declaration,
        name: String,
        cx: &mut BuildContext<'_>,
    ) -> Result<SchemaType> {
        let info = self.object_info.retrieve(decl);
        let mut fields = self.collector.collect(decl, cx, self)?;
        self.extensions
            .apply_extensions(&name, &mut fields, cx, self)?;
        let directives = applied_directives(&decl.annotations, &name, cx)?;

        Ok(SchemaType::Interface(InterfaceType {
            name,
            description: info.description,
            fields,
            type_resolver: decl.annotations.type_resolver.clone(),
            directives,
        }))
    }

    fn build_input_object(
        &self,
        decl: &Declaration,
        name: String,
        cx: &mut BuildContext<'_>,
    ) -> Result<SchemaType> {
        let info = self.object_info.retrieve(decl);
        let fields = self.collector.collect_input(decl, cx, self)?;
        let directives = applied_directives(&decl.annotations, &name, cx)?;

        Ok(SchemaType::InputObject(InputObjectType {
            name,
            description: info.description,
            fields,
            directives,
        }))
    }

    fn build_enum(
        &self,
        decl: &Declaration,
        values: &[EnumValueDecl],
        name: String,
        cx: &mut BuildContext<'_>,
    ) -> Result<SchemaType> {
        let values = values
            .iter()
            .filter(|v| !v.annotations.ignore)
            .map(|v| EnumValueDefinition {
                name: to_graphql_name(v.annotations.name.as_deref().unwrap_or(&v.name)),
                description: v.annotations.description.clone(),
                deprecation: v.annotations.deprecated.clone(),
            })
            .collect();
        let directives = applied_directives(&decl.annotations, &name, cx)?;

        Ok(SchemaType::Enum(EnumType {
            name,
            description: decl.annotations.description.clone(),
            values,
            directives,
        }))
    }

    /// Resolves the schema-annotated interfaces among `decl`'s ancestors.
    fn interfaces(&self, decl: &Declaration, cx: &mut BuildContext<'_>) -> Result<Vec<String>> {
        let source = cx.source;
        let mut names = Vec::new();
        for level in source.hierarchy_levels(decl).into_iter().skip(1) {
            for ancestor in level {
                if ancestor.is_interface() && source.is_schema_type(ancestor) {
                    let node = self.resolve(&ancestor.name, false, cx)?;
                    names.push(node.name().to_string());
                }
            }
        }
        Ok(names)
    }
}

impl DeclarationResolver for TypeRetriever {
    fn resolve_declaration(
        &self,
        name: &str,
        input: bool,
        cx: &mut BuildContext<'_>,
    ) -> Result<Arc<SchemaType>> {
        self.resolve(name, input, cx)
    }
}

/// The empty node registered while a declaration is being built.
fn placeholder(decl: &Declaration, name: &str, input: bool) -> SchemaType {
    let name = name.to_string();
    let description = decl.annotations.description.clone();
    match (&decl.kind, input) {
        (DeclarationKind::Enum(_), _) => SchemaType::Enum(EnumType {
            name,
            description,
            values: Vec::new(),
            directives: Vec::new(),
        }),
        (_, true) => SchemaType::InputObject(InputObjectType {
            name,
            description,
            fields: Vec::new(),
            directives: Vec::new(),
        }),
        (DeclarationKind::Interface, false) => SchemaType::Interface(InterfaceType {
            name,
            description,
            fields: Vec::new(),
            type_resolver: decl.annotations.type_resolver.clone(),
            directives: Vec::new(),
        }),
        (DeclarationKind::Class, false) => SchemaType::Object(ObjectType {
            name,
            description,
            fields: Vec::new(),
            interfaces: Vec::new(),
            directives: Vec::new(),
        }),
    }
}

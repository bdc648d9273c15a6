//! The processor facade: one build session over a declaration source.

use std::sync::Arc;

use annograph_foundation::{
    Declaration, DeclarationSource, DirectiveAndWiring, DirectiveDefinition, ErrorKind, Result,
    SchemaBuildError, SchemaType,
};
use im::OrdMap;

use crate::config::ProcessorConfig;
use crate::container::{BuildContext, ProcessingElementsContainer};
use crate::directive::DirectiveCreator;
use crate::retriever::TypeRetriever;
use crate::type_function::TypeFunction;

/// A snapshot of everything built in a session.
#[derive(Clone, Debug)]
pub struct Schema {
    /// The query root.
    pub query: Arc<SchemaType>,
    /// The mutation root, if any.
    pub mutation: Option<Arc<SchemaType>>,
    /// Every registered type, by schema name.
    pub types: OrdMap<String, Arc<SchemaType>>,
    /// Every registered directive with its wiring, sorted by name.
    pub directives: Vec<DirectiveAndWiring>,
}

impl Schema {
    /// Returns the type with the given schema name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<SchemaType>> {
        self.types.get(name)
    }
}

/// Builds schema types from the declarations of a [`DeclarationSource`].
///
/// # Example
///
/// ```
/// use annograph_foundation::{Declaration, DeclarationCatalog, Member, ValueType};
/// use annograph_processor::AnnotationsProcessor;
///
/// let catalog = DeclarationCatalog::new().with(
///     Declaration::class("Query")
///         .with_member(Member::method("getGreeting", ValueType::named("String")).graphql_field()),
/// );
/// let mut processor = AnnotationsProcessor::new(catalog);
/// let query = processor.object("Query").unwrap();
/// assert_eq!(query.fields()[0].name, "greeting");
/// ```
pub struct AnnotationsProcessor<S: DeclarationSource> {
    source: S,
    config: ProcessorConfig,
    container: ProcessingElementsContainer,
    retriever: TypeRetriever,
    directive_creator: DirectiveCreator,
}

impl<S: DeclarationSource> AnnotationsProcessor<S> {
    /// Creates a processor with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ProcessorConfig::default())
    }

    /// Creates a processor with the given configuration.
    pub fn with_config(source: S, config: ProcessorConfig) -> Self {
        Self {
            source,
            config,
            container: ProcessingElementsContainer::new(),
            retriever: TypeRetriever::default(),
            directive_creator: DirectiveCreator::default(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Returns the session container.
    #[must_use]
    pub fn container(&self) -> &ProcessingElementsContainer {
        &self.container
    }

    /// Returns the session container mutably.
    pub fn container_mut(&mut self) -> &mut ProcessingElementsContainer {
        &mut self.container
    }

    /// Returns every finished type.
    #[must_use]
    pub fn type_registry(&self) -> &OrdMap<String, Arc<SchemaType>> {
        self.container.type_registry()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolves `name` as an output type (object, interface, or enum).
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration or anything it references cannot
    /// be resolved. Finished and in-flight types are cleared on failure.
    pub fn object(&mut self, name: &str) -> Result<Arc<SchemaType>> {
        let mut cx = BuildContext::new(&self.source, &self.config, &mut self.container);
        self.retriever.retrieve(name, false, &mut cx)
    }

    /// Resolves `name` as an interface.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not an interface declaration or fails
    /// to resolve.
    pub fn interface(&mut self, name: &str) -> Result<Arc<SchemaType>> {
        match self.source.declaration(name).map(Declaration::is_interface) {
            Some(true) => self.object(name),
            Some(false) => Err(SchemaBuildError::new(ErrorKind::Internal(format!(
                "{name} is not an interface"
            )))),
            None => Err(SchemaBuildError::unknown_declaration(name)),
        }
    }

    /// Resolves `name` as an input object, prefixed per the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration or anything it references cannot
    /// be resolved. Finished and in-flight types are cleared on failure.
    pub fn input_object(&mut self, name: &str) -> Result<Arc<SchemaType>> {
        let mut cx = BuildContext::new(&self.source, &self.config, &mut self.container);
        self.retriever.retrieve(name, true, &mut cx)
    }

    /// Returns the schema name `name` resolves to, without building it.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration is unknown.
    pub fn type_name(&self, name: &str, input: bool) -> Result<String> {
        let decl = self
            .source
            .declaration(name)
            .ok_or_else(|| SchemaBuildError::unknown_declaration(name))?;
        Ok(self.retriever.schema_name(decl, input, &self.config))
    }

    // =========================================================================
    // Directives
    // =========================================================================

    /// Builds and registers the directive defined by the declaration `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration is unknown or unmarked, or if an
    /// argument type cannot be resolved. Finished and in-flight types are
    /// cleared on failure.
    pub fn directive(&mut self, name: &str) -> Result<DirectiveDefinition> {
        let decl = self
            .source
            .declaration(name)
            .ok_or_else(|| SchemaBuildError::unknown_declaration(name))?;
        let mut cx = BuildContext::new(&self.source, &self.config, &mut self.container);
        self.directive_creator
            .build_directive(decl, &mut cx, &self.retriever)
            .inspect_err(|_| cx.container.reset())
    }

    /// Builds and registers every directive defined by the marked methods of
    /// the declaration `name`.
    ///
    /// # Errors
    ///
    /// Returns the first directive creation error. Finished and in-flight
    /// types are cleared on failure.
    pub fn directives(&mut self, name: &str) -> Result<Vec<DirectiveDefinition>> {
        let decl = self
            .source
            .declaration(name)
            .ok_or_else(|| SchemaBuildError::unknown_declaration(name))?;
        let mut cx = BuildContext::new(&self.source, &self.config, &mut self.container);
        self.directive_creator
            .directives(decl, &mut cx, &self.retriever)
            .inspect_err(|_| cx.container.reset())
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers the extension declaration `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration is unknown, lacks the extension
    /// marker, or names an unknown base.
    pub fn register_type_extension(&mut self, name: &str) -> Result<()> {
        let decl = self
            .source
            .declaration(name)
            .ok_or_else(|| SchemaBuildError::unknown_declaration(name))?;
        let mut cx = BuildContext::new(&self.source, &self.config, &mut self.container);
        self.retriever.extensions().register_extension(decl, &mut cx)
    }

    /// Unregisters the extension declaration `name`.
    ///
    /// Returns true if it was registered.
    pub fn unregister_type_extension(&mut self, name: &str) -> bool {
        let Some(decl) = self.source.declaration(name) else {
            return false;
        };
        let mut cx = BuildContext::new(&self.source, &self.config, &mut self.container);
        self.retriever.extensions().unregister_extension(decl, &mut cx)
    }

    /// Registers a type function ahead of every existing rule.
    pub fn register_type_function(&mut self, rule: impl TypeFunction + 'static) {
        self.container.type_functions_mut().register(rule);
    }

    // =========================================================================
    // Schema
    // =========================================================================

    /// Resolves the query and optional mutation roots and snapshots the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn build_schema(&mut self, query: &str, mutation: Option<&str>) -> Result<Schema> {
        let query = self.object(query)?;
        let mutation = mutation.map(|name| self.object(name)).transpose()?;
        Ok(Schema {
            query,
            mutation,
            types: self.container.type_registry().clone(),
            directives: self
                .container
                .directives()
                .entries()
                .into_iter()
                .cloned()
                .collect(),
        })
    }
}

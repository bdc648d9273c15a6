//! Shared state for one processing session.
//!
//! The `ProcessingElementsContainer` tracks:
//! - Finished types, keyed by schema name
//! - Types under construction (placeholders used to break cycles)
//! - Directive definitions and their wiring
//! - The active type-function chain
//! - Registered type extensions

use std::collections::HashMap;
use std::sync::Arc;

use annograph_foundation::{DeclarationSource, Result, ScalarType, SchemaType, TypeRef, ValueType};
use im::OrdMap;

use crate::config::ProcessorConfig;
use crate::directive::DirectiveRegistry;
use crate::extensions::ExtensionRegistry;
use crate::type_function::{AnnotationContext, TypeFunctionRegistry};

// =============================================================================
// ProcessingElementsContainer
// =============================================================================

/// Registries shared across one build session.
///
/// Not synchronized: a container must not be shared between concurrent
/// builds.
#[derive(Debug, Default, Clone)]
pub struct ProcessingElementsContainer {
    /// Finished types by schema name.
    type_registry: OrdMap<String, Arc<SchemaType>>,
    /// In-flight placeholders by schema name.
    processing: HashMap<String, Arc<SchemaType>>,
    /// Directive definitions by name.
    directives: DirectiveRegistry,
    /// Active type-function chain.
    type_functions: TypeFunctionRegistry,
    /// Extension declarations by base type name.
    extensions: ExtensionRegistry,
}

impl ProcessingElementsContainer {
    /// Creates an empty container with the default type-function table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container using the given type functions.
    #[must_use]
    pub fn with_type_functions(type_functions: TypeFunctionRegistry) -> Self {
        Self {
            type_functions,
            ..Self::default()
        }
    }

    /// Returns the finished type registry.
    #[must_use]
    pub fn type_registry(&self) -> &OrdMap<String, Arc<SchemaType>> {
        &self.type_registry
    }

    /// Returns a finished type.
    #[must_use]
    pub fn registered(&self, name: &str) -> Option<Arc<SchemaType>> {
        self.type_registry.get(name).cloned()
    }

    /// Returns the placeholder of a type under construction.
    #[must_use]
    pub fn in_flight(&self, name: &str) -> Option<Arc<SchemaType>> {
        self.processing.get(name).cloned()
    }

    /// Returns a finished type or, failing that, its placeholder.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<SchemaType>> {
        self.registered(name).or_else(|| self.in_flight(name))
    }

    /// Returns true if `name` is currently under construction.
    #[must_use]
    pub fn is_processing(&self, name: &str) -> bool {
        self.processing.contains_key(name)
    }

    /// Returns the names currently under construction.
    #[must_use]
    pub fn processing_names(&self) -> Vec<&str> {
        self.processing.keys().map(String::as_str).collect()
    }

    /// Registers a placeholder for a type about to be built.
    pub fn begin(&mut self, name: String, placeholder: SchemaType) -> Arc<SchemaType> {
        let placeholder = Arc::new(placeholder);
        self.processing.insert(name, Arc::clone(&placeholder));
        placeholder
    }

    /// Moves a built type from `processing` into the registry.
    pub fn finish(&mut self, node: SchemaType) -> Arc<SchemaType> {
        let name = node.name().to_string();
        self.processing.remove(&name);
        let node = Arc::new(node);
        self.type_registry.insert(name, Arc::clone(&node));
        node
    }

    /// Registers a custom scalar unless the name is already taken.
    pub fn register_scalar(&mut self, scalar: ScalarType) {
        if !self.type_registry.contains_key(&scalar.name) {
            tracing::debug!(scalar = %scalar.name, "registering custom scalar");
            self.type_registry
                .insert(scalar.name.clone(), Arc::new(SchemaType::Scalar(scalar)));
        }
    }

    /// Maps `value_type` through the type-function chain, registering any
    /// scalar the matching rule publishes.
    ///
    /// Returns `None` if no rule claims the type.
    pub fn map_type(
        &mut self,
        value_type: &ValueType,
        ctx: &AnnotationContext<'_>,
    ) -> Option<Result<TypeRef>> {
        let mapped = self.type_functions.try_map(value_type, ctx)?;
        Some(mapped.map(|(ty, scalar)| {
            if let Some(scalar) = scalar {
                self.register_scalar(scalar);
            }
            ty
        }))
    }

    /// Returns the directive registry.
    #[must_use]
    pub fn directives(&self) -> &DirectiveRegistry {
        &self.directives
    }

    /// Returns the directive registry mutably.
    pub fn directives_mut(&mut self) -> &mut DirectiveRegistry {
        &mut self.directives
    }

    /// Returns the type-function chain.
    #[must_use]
    pub fn type_functions(&self) -> &TypeFunctionRegistry {
        &self.type_functions
    }

    /// Returns the type-function chain mutably.
    pub fn type_functions_mut(&mut self) -> &mut TypeFunctionRegistry {
        &mut self.type_functions
    }

    /// Returns the extension registry.
    #[must_use]
    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// Returns the extension registry mutably.
    pub fn extensions_mut(&mut self) -> &mut ExtensionRegistry {
        &mut self.extensions
    }

    /// Clears finished and in-flight types after a failed build.
    ///
    /// Directives, type functions, and extensions survive.
    pub fn reset(&mut self) {
        tracing::debug!(
            finished = self.type_registry.len(),
            in_flight = self.processing.len(),
            "clearing type registries after failed build"
        );
        self.type_registry.clear();
        self.processing.clear();
    }
}

// =============================================================================
// BuildContext
// =============================================================================

/// Everything a retriever needs while resolving one declaration.
pub struct BuildContext<'a> {
    /// Declaration lookup.
    pub source: &'a dyn DeclarationSource,
    /// Processor configuration.
    pub config: &'a ProcessorConfig,
    /// Session state.
    pub container: &'a mut ProcessingElementsContainer,
}

impl<'a> BuildContext<'a> {
    /// Creates a build context.
    pub fn new(
        source: &'a dyn DeclarationSource,
        config: &'a ProcessorConfig,
        container: &'a mut ProcessingElementsContainer,
    ) -> Self {
        Self {
            source,
            config,
            container,
        }
    }
}

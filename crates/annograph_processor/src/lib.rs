//! Type retrieval engine for annograph.
//!
//! This crate turns annotated declarations into GraphQL schema types:
//! - [`TypeRetriever`] - Depth-first, cycle-safe resolution with a shared registry
//! - [`FieldRetriever`] / [`FieldCollector`] - Member to field translation
//! - [`BreadthFirstSearch`] / [`ParentalSearch`] - Member selection over hierarchies
//! - [`TypeFunctionRegistry`] - Pluggable value-type to schema-type rules
//! - [`ExtensionsHandler`] - Field contributions from extension declarations
//! - [`DirectiveCreator`] - Directive definitions and their wiring
//! - [`AnnotationsProcessor`] - Session facade tying it all together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod container;
pub mod directive;
pub mod extensions;
pub mod fetcher;
pub mod field;
pub mod object_info;
pub mod processor;
pub mod retriever;
pub mod search;
pub mod type_function;

pub use config::{OnCollision, ProcessorConfig};
pub use container::{BuildContext, ProcessingElementsContainer};
pub use directive::{DirectiveCreator, DirectiveRegistry, applied_directives};
pub use extensions::{ExtensionRegistry, ExtensionsHandler};
pub use field::{DeclarationResolver, FieldCollector, FieldRetriever};
pub use object_info::{ObjectInfo, ObjectInfoRetriever};
pub use processor::{AnnotationsProcessor, Schema};
pub use retriever::TypeRetriever;
pub use search::{BreadthFirstSearch, ParentalSearch, SearchAlgorithm};
pub use type_function::{
    AnnotationContext, IdFunction, MappingRule, ScalarFunction, TypeFunction,
    TypeFunctionRegistry,
};

//! Declaration model, schema types, and errors for annograph.
//!
//! This crate provides:
//! - [`Declaration`] - Annotated class/interface/enum input model
//! - [`DeclarationSource`] - Lookup capability over a set of declarations
//! - [`ValueType`] - Static shape of a declared member type
//! - [`SchemaType`] - Resolved GraphQL schema type nodes
//! - [`SchemaBuildError`] - Errors with declaration/member context
//! - Naming helpers ([`to_graphql_name`], [`strip_accessor_prefix`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod declaration;
pub mod error;
pub mod naming;
pub mod schema;
pub mod value;
pub mod value_type;

pub use catalog::{DeclarationCatalog, DeclarationSource};
pub use declaration::{
    Annotations, DataFetcherRef, Declaration, DeclarationKind, DirectiveDefinitionMarker,
    DirectiveUse, EnumValueDecl, Member, MemberKind, Parameter,
};
pub use error::{ErrorContext, ErrorKind, SchemaBuildError};
pub use naming::{is_valid_graphql_name, strip_accessor_prefix, to_graphql_name};
pub use schema::{
    AppliedDirective, ArgumentDefinition, DirectiveAndWiring, DirectiveDefinition,
    DirectiveLocation, EnumType, EnumValueDefinition, Fetcher, FieldDefinition, InputObjectType,
    InterfaceType, ObjectType, ScalarType, SchemaType, TypeRef, BUILTIN_SCALARS,
};
pub use value::Value;
pub use value_type::ValueType;

/// Result type alias using [`SchemaBuildError`].
pub type Result<T> = std::result::Result<T, SchemaBuildError>;

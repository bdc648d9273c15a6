//! Annograph - GraphQL schema types from annotated declarations
//!
//! This crate re-exports all layers of the annograph system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: annograph_processor - Type retrieval, member search, fields,
//!                                extensions, directives, type functions
//! Layer 0: annograph_foundation - Declarations, schema types, errors, naming
//! ```

pub use annograph_foundation as foundation;
pub use annograph_processor as processor;

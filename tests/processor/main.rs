//! Integration tests for Layer 1: Processor
//!
//! Tests for type resolution, member search, extensions, directives, type
//! functions, and schema snapshots.

mod directives;
mod resolution;
mod type_functions;

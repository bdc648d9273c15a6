//! Integration tests for Layer 0: Foundation
//!
//! Tests for the declaration model, naming rules, schema types, and errors.

mod declarations;
mod errors;
mod naming;

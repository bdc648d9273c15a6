//! Integration tests for error types
//!
//! Tests error construction, display, context, and error kinds.

use annograph_foundation::{ErrorContext, ErrorKind, SchemaBuildError};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_not_directive_definition() {
    let err = SchemaBuildError::not_directive_definition("Auth");
    assert!(matches!(err.kind, ErrorKind::NotDirectiveDefinition { .. }));
    assert!(err.to_string().contains("Auth"));
    assert_eq!(err.declaration(), Some("Auth"));
}

#[test]
fn error_unresolvable_type() {
    let err = SchemaBuildError::unresolvable_type("Query", "getTotal", "Decimal");
    assert!(matches!(err.kind, ErrorKind::UnresolvableType { .. }));
    let msg = err.to_string();
    assert!(msg.contains("Query"));
    assert!(msg.contains("getTotal"));
    assert!(msg.contains("Decimal"));

    let context = err.context.as_ref().unwrap();
    assert_eq!(context.member.as_deref(), Some("getTotal"));
}

#[test]
fn error_unknown_declaration() {
    let err = SchemaBuildError::unknown_declaration("Ghost");
    assert!(matches!(err.kind, ErrorKind::UnknownDeclaration(_)));
    assert_eq!(err.declaration(), Some("Ghost"));
}

#[test]
fn error_unknown_directive() {
    let err = SchemaBuildError::unknown_directive("auth", "Query.user");
    assert!(matches!(err.kind, ErrorKind::UnknownDirective { .. }));
    let msg = err.to_string();
    assert!(msg.contains("auth"));
    assert!(msg.contains("Query.user"));
}

#[test]
fn error_name_collision() {
    let err = SchemaBuildError::name_collision("User", "email");
    assert!(matches!(err.kind, ErrorKind::NameCollision { .. }));
    assert!(err.to_string().contains("email"));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn frames_accumulate_innermost_first() {
    let err = SchemaBuildError::unknown_declaration("Leaf")
        .with_frame("while resolving Branch")
        .with_frame("while resolving Root");
    let stack = &err.context.as_ref().unwrap().stack;
    assert_eq!(stack, &["while resolving Branch", "while resolving Root"]);
}

#[test]
fn context_supplies_declaration_for_untyped_kinds() {
    let err = SchemaBuildError::name_collision("directive registry", "auth")
        .with_context(ErrorContext::new().with_declaration("Directives"));
    assert_eq!(err.declaration(), Some("Directives"));
}

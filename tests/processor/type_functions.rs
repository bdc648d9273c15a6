//! Integration tests for the type-function registry

use annograph_foundation::{
    Declaration, DeclarationCatalog, ErrorKind, Member, SchemaType, TypeRef, ValueType,
};
use annograph_processor::{AnnotationsProcessor, MappingRule};

fn catalog() -> DeclarationCatalog {
    [
        Declaration::class("Product")
            .with_member(Member::field("id", ValueType::named("u64")).graphql_field().id())
            .with_member(Member::field("price", ValueType::named("Decimal")).graphql_field())
            .with_member(Member::field("stock", ValueType::named("i64")).graphql_field())
            .with_member(Member::field("name", ValueType::named("String")).graphql_field())
            .with_member(
                Member::field("tags", ValueType::list(ValueType::named("String"))).graphql_field(),
            ),
        Declaration::class("Decimal"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn unmapped_type_without_rule_fails() {
    let mut processor = AnnotationsProcessor::new(catalog());
    let err = processor.object("Product").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnresolvableType { ref value_type, .. } if value_type == "Decimal"
    ));
}

#[test]
fn custom_rule_publishes_scalar() {
    let mut processor = AnnotationsProcessor::new(catalog());
    processor.register_type_function(
        MappingRule::scalar("Money", |ty, _| ty.as_named() == Some("Decimal"))
            .described("Fixed-point amount"),
    );

    let product = processor.object("Product").unwrap();
    assert_eq!(product.field("price").unwrap().ty, TypeRef::named("Money"));

    let money = processor.type_registry().get("Money").unwrap();
    assert!(matches!(&**money, SchemaType::Scalar(s) if s.description.as_deref() == Some("Fixed-point amount")));
}

#[test]
fn default_table_fallback() {
    let mut processor = AnnotationsProcessor::new(catalog());
    processor.register_type_function(MappingRule::scalar("Money", |ty, _| {
        ty.as_named() == Some("Decimal")
    }));

    let product = processor.object("Product").unwrap();
    assert_eq!(product.field("id").unwrap().ty, TypeRef::named("ID"));
    assert_eq!(product.field("stock").unwrap().ty, TypeRef::named("Long"));
    assert_eq!(product.field("name").unwrap().ty, TypeRef::named("String"));
    assert_eq!(product.field("tags").unwrap().ty.to_string(), "[String]");
}

#[test]
fn later_rules_take_priority() {
    let mut processor = AnnotationsProcessor::new(catalog());
    processor.register_type_function(MappingRule::scalar("Money", |ty, _| {
        ty.as_named() == Some("Decimal")
    }));
    processor.register_type_function(MappingRule::scalar("BigDecimal", |ty, _| {
        ty.as_named() == Some("Decimal")
    }));

    let product = processor.object("Product").unwrap();
    assert_eq!(product.field("price").unwrap().ty, TypeRef::named("BigDecimal"));
    assert!(processor.type_registry().get("Money").is_none());
}

#[test]
fn custom_rule_overrides_default_table() {
    let mut processor = AnnotationsProcessor::new(catalog());
    processor.register_type_function(MappingRule::scalar("Money", |ty, _| {
        ty.as_named() == Some("Decimal")
    }));
    processor.register_type_function(MappingRule::to_type(TypeRef::named("Int"), |ty, _| {
        ty.as_named() == Some("i64")
    }));

    let product = processor.object("Product").unwrap();
    assert_eq!(product.field("stock").unwrap().ty, TypeRef::named("Int"));
}

#[test]
fn rules_survive_failed_builds() {
    let mut processor = AnnotationsProcessor::new(catalog());
    processor.register_type_function(MappingRule::to_type(TypeRef::named("Int"), |ty, _| {
        ty.as_named() == Some("i64")
    }));
    processor.object("Product").unwrap_err();

    processor.register_type_function(MappingRule::scalar("Money", |ty, _| {
        ty.as_named() == Some("Decimal")
    }));
    let product = processor.object("Product").unwrap();
    assert_eq!(product.field("stock").unwrap().ty, TypeRef::named("Int"));
    assert_eq!(processor.container().type_functions().custom_len(), 2);
}

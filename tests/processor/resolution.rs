//! Integration tests for type resolution
//!
//! Tests idempotence, cycle termination, failure rollback, and naming.

use std::sync::Arc;

use annograph_foundation::{
    Declaration, DeclarationCatalog, ErrorKind, Member, Parameter, SchemaType, TypeRef, ValueType,
};
use annograph_processor::{AnnotationsProcessor, ProcessorConfig};

fn named(name: &str) -> ValueType {
    ValueType::named(name)
}

fn shop() -> DeclarationCatalog {
    [
        Declaration::class("Customer")
            .described("A paying customer")
            .with_member(Member::method("getName", named("String")).graphql_field().non_null())
            .with_member(
                Member::method("getOrders", ValueType::list(named("Order"))).graphql_field(),
            )
            .with_member(Member::method("getReferrer", named("Customer")).graphql_field()),
        Declaration::class("Order")
            .with_member(Member::method("getCustomer", named("Customer")).graphql_field())
            .with_member(Member::field("total", named("f64")).graphql_field()),
        Declaration::class("Query")
            .with_member(
                Member::method("customer", named("Customer"))
                    .graphql_field()
                    .with_parameter(Parameter::new("filter", named("CustomerFilter"))),
            ),
        Declaration::class("CustomerFilter")
            .with_member(Member::field("name", named("String")).graphql_field()),
        Declaration::class("Invoice")
            .with_member(Member::method("getOrder", named("Order")).graphql_field())
            .with_member(Member::method("getCurrency", named("Currency")).graphql_field()),
        Declaration::class("Currency"),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Idempotence and Cycles
// =============================================================================

#[test]
fn repeated_resolution_returns_same_node() {
    let mut processor = AnnotationsProcessor::new(shop());
    let first = processor.object("Customer").unwrap();
    let second = processor.object("Customer").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn self_reference_resolves_by_name() {
    let mut processor = AnnotationsProcessor::new(shop());
    let customer = processor.object("Customer").unwrap();

    assert_eq!(customer.field("referrer").unwrap().ty, TypeRef::named("Customer"));
    assert!(processor.container().processing_names().is_empty());
}

#[test]
fn mutual_recursion_registers_both_once() {
    let mut processor = AnnotationsProcessor::new(shop());
    processor.object("Order").unwrap();

    let registry = processor.type_registry();
    assert_eq!(registry.len(), 2);
    let customer = registry.get("Customer").unwrap();
    let order = registry.get("Order").unwrap();
    assert_eq!(customer.field("orders").unwrap().ty.to_string(), "[Order]");
    assert_eq!(order.field("customer").unwrap().ty.base_name(), "Customer");

    let again = processor.object("Customer").unwrap();
    assert!(Arc::ptr_eq(&again, processor.type_registry().get("Customer").unwrap()));
}

#[test]
fn fields_carry_markers_and_descriptions() {
    let mut processor = AnnotationsProcessor::new(shop());
    let customer = processor.object("Customer").unwrap();

    assert_eq!(customer.description(), Some("A paying customer"));
    assert_eq!(customer.field("name").unwrap().ty.to_string(), "String!");
    let order = processor.object("Order").unwrap();
    assert_eq!(order.field("total").unwrap().ty, TypeRef::named("Float"));
}

// =============================================================================
// Inherited Eligibility
// =============================================================================

fn kennel() -> DeclarationCatalog {
    [
        Declaration::class("Animal")
            .with_member(Member::method("getName", named("String")).graphql_field()),
        Declaration::class("Dog").extends("Animal"),
        Declaration::interface("Entity")
            .with_member(Member::method("getId", named("String")).graphql_field()),
        Declaration::class("Account").implements("Entity"),
        Declaration::class("Kennel")
            .with_member(Member::method("getDog", named("Dog")).graphql_field())
            .with_member(Member::method("getOwner", named("Account")).graphql_field()),
        Declaration::class("Stray").extends("Plain"),
        Declaration::class("Plain"),
        Declaration::class("Shelter")
            .with_member(Member::method("getStray", named("Stray")).graphql_field()),
    ]
    .into_iter()
    .collect()
}

#[test]
fn subclass_with_inherited_fields_usable_as_field_type() {
    let mut processor = AnnotationsProcessor::new(kennel());
    let kennel = processor.object("Kennel").unwrap();

    assert_eq!(kennel.field("dog").unwrap().ty, TypeRef::named("Dog"));
    let dog = processor.type_registry().get("Dog").unwrap();
    assert_eq!(dog.field("name").unwrap().ty, TypeRef::named("String"));
}

#[test]
fn implementor_of_annotated_interface_usable_as_field_type() {
    let mut processor = AnnotationsProcessor::new(kennel());
    let kennel = processor.object("Kennel").unwrap();

    assert_eq!(kennel.field("owner").unwrap().ty, TypeRef::named("Account"));
    let account = processor.type_registry().get("Account").unwrap();
    assert!(account.field("id").is_some());
    assert_eq!(account.as_object().unwrap().interfaces, ["Entity"]);
}

#[test]
fn unannotated_hierarchy_still_unresolvable() {
    let mut processor = AnnotationsProcessor::new(kennel());
    let err = processor.object("Shelter").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnresolvableType { ref member, .. } if member == "getStray"
    ));
}

// =============================================================================
// Input Objects
// =============================================================================

#[test]
fn arguments_build_input_objects() {
    let mut processor = AnnotationsProcessor::new(shop());
    let query = processor.object("Query").unwrap();

    let filter = query.field("customer").unwrap().argument("filter").unwrap();
    assert_eq!(filter.ty, TypeRef::named("InputCustomerFilter"));
    let input = processor.type_registry().get("InputCustomerFilter").unwrap();
    assert!(matches!(&**input, SchemaType::InputObject(i) if i.fields.len() == 1));
}

#[test]
fn input_prefix_configurable() {
    let config = ProcessorConfig::default().with_input_prefix("In_");
    let mut processor = AnnotationsProcessor::with_config(shop(), config);
    let input = processor.input_object("CustomerFilter").unwrap();
    assert_eq!(input.name(), "In_CustomerFilter");
    assert_eq!(processor.type_name("CustomerFilter", true).unwrap(), "In_CustomerFilter");
    assert_eq!(processor.type_name("CustomerFilter", false).unwrap(), "CustomerFilter");
}

// =============================================================================
// Failure Rollback
// =============================================================================

#[test]
fn failure_clears_registry() {
    let mut processor = AnnotationsProcessor::new(shop());
    processor.object("Customer").unwrap();
    assert!(!processor.type_registry().is_empty());

    let err = processor.object("Invoice").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnresolvableType { ref member, .. } if member == "getCurrency"
    ));
    assert_eq!(err.declaration(), Some("Invoice"));
    assert!(processor.type_registry().is_empty());
    assert!(processor.container().processing_names().is_empty());
}

#[test]
fn failure_in_nested_type_reports_chain() {
    let catalog = shop().with(
        Declaration::class("Ledger")
            .with_member(Member::method("getInvoice", named("Invoice")).graphql_field()),
    );
    let mut processor = AnnotationsProcessor::new(catalog);

    let err = processor.object("Ledger").unwrap_err();
    assert_eq!(err.declaration(), Some("Invoice"));
    let stack = &err.context.as_ref().unwrap().stack;
    assert_eq!(stack, &["while resolving Invoice", "while resolving Ledger"]);
}

#[test]
fn session_recovers_after_failure() {
    let mut processor = AnnotationsProcessor::new(shop());
    processor.object("Invoice").unwrap_err();

    let customer = processor.object("Customer").unwrap();
    assert_eq!(customer.name(), "Customer");
    assert!(processor.type_registry().contains_key("Order"));
}

#[test]
fn unknown_root() {
    let mut processor = AnnotationsProcessor::new(shop());
    let err = processor.object("Nope").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownDeclaration(_)));
}

#[test]
fn interface_entry_point_checks_kind() {
    let catalog = shop().with(
        Declaration::interface("Priced")
            .with_member(Member::method("getPrice", named("f64")).graphql_field()),
    );
    let mut processor = AnnotationsProcessor::new(catalog);

    let priced = processor.interface("Priced").unwrap();
    assert!(priced.as_interface().is_some());
    assert!(processor.interface("Customer").is_err());
}

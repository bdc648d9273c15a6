//! Integration tests for the declaration model and catalog

use annograph_foundation::{
    Declaration, DeclarationCatalog, DeclarationKind, DeclarationSource, DirectiveLocation,
    DirectiveUse, Member, Parameter, Value, ValueType,
};

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn schema_annotation_detection() {
    assert!(!Declaration::class("Plain").is_schema_annotated());
    assert!(Declaration::class("Named").named("Alias").is_schema_annotated());
    assert!(Declaration::class("Described").described("doc").is_schema_annotated());
    assert!(Declaration::enumeration("Color", ["RED"]).is_schema_annotated());
    assert!(
        Declaration::class("Marked")
            .with_member(Member::field("x", ValueType::named("i32")).graphql_field())
            .is_schema_annotated()
    );
}

#[test]
fn supertypes_superclass_first() {
    let decl = Declaration::class("Dog")
        .implements("Pet")
        .extends("Animal")
        .implements("Named");
    let supertypes: Vec<_> = decl.supertypes().collect();
    assert_eq!(supertypes, vec!["Animal", "Pet", "Named"]);
}

#[test]
fn signature_keys_distinguish_overloads() {
    let plain = Member::method("find", ValueType::named("User"));
    let by_id = Member::method("find", ValueType::named("User"))
        .with_parameter(Parameter::new("id", ValueType::named("String")));
    let by_ids = Member::method("find", ValueType::named("User")).with_parameter(Parameter::new(
        "ids",
        ValueType::list(ValueType::named("String")),
    ));

    assert_ne!(plain.signature_key(), by_id.signature_key());
    assert_ne!(by_id.signature_key(), by_ids.signature_key());
    assert_eq!(
        by_id.signature_key(),
        Member::method("find", ValueType::named("Other"))
            .with_parameter(Parameter::new("key", ValueType::named("String")))
            .signature_key()
    );
}

#[test]
fn enum_values_in_declared_order() {
    let decl = Declaration::enumeration("Status", ["ACTIVE", "SUSPENDED", "CLOSED"]);
    let DeclarationKind::Enum(values) = &decl.kind else {
        panic!("expected enum");
    };
    let names: Vec<_> = values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["ACTIVE", "SUSPENDED", "CLOSED"]);
}

#[test]
fn member_annotations_compose() {
    let member = Member::method("getEmail", ValueType::named("String"))
        .graphql_field()
        .non_null()
        .deprecated("use contact")
        .with_directive(DirectiveUse::new("auth").with_argument("role", "admin"));

    assert!(member.annotations.field);
    assert!(member.annotations.non_null);
    assert_eq!(member.annotations.deprecated.as_deref(), Some("use contact"));
    assert_eq!(
        member.annotations.directives[0].arguments,
        vec![("role".to_string(), Value::String("admin".into()))]
    );
}

#[test]
fn directive_definition_marker() {
    let decl = Declaration::class("Upper")
        .directive_definition("UpperWiring", vec![DirectiveLocation::FieldDefinition]);
    let marker = decl.annotations.directive_definition.as_ref().unwrap();
    assert_eq!(marker.wiring, "UpperWiring");
    assert_eq!(marker.locations, vec![DirectiveLocation::FieldDefinition]);
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn catalog_lookup_and_replace() {
    let mut catalog = DeclarationCatalog::new();
    assert!(catalog.insert(Declaration::class("User")).is_none());
    let replaced = catalog.insert(Declaration::class("User").described("v2"));
    assert!(replaced.is_some());
    assert_eq!(catalog.len(), 1);
    assert_eq!(
        catalog.declaration("User").unwrap().annotations.description.as_deref(),
        Some("v2")
    );
    assert!(catalog.declaration("Missing").is_none());
}

#[test]
fn borrowed_catalog_is_a_source() {
    fn count_levels(source: impl DeclarationSource, name: &str) -> usize {
        let decl = source.declaration(name).unwrap();
        source.hierarchy_levels(decl).len()
    }

    let catalog: DeclarationCatalog = [
        Declaration::class("C").extends("B"),
        Declaration::class("B").extends("A"),
        Declaration::class("A"),
    ]
    .into_iter()
    .collect();

    assert_eq!(count_levels(&catalog, "C"), 3);
}

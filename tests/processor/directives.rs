//! Integration tests for directive definitions and applied directives

use annograph_foundation::{
    Declaration, DeclarationCatalog, DirectiveLocation, DirectiveUse, ErrorKind, Member,
    Parameter, TypeRef, Value, ValueType,
};
use annograph_processor::{AnnotationsProcessor, MappingRule, ProcessorConfig};

fn catalog() -> DeclarationCatalog {
    [
        Declaration::class("Auth")
            .named("auth")
            .directive_definition("AuthWiring", vec![DirectiveLocation::FieldDefinition])
            .with_member(Member::field("role", ValueType::named("Role")).non_null())
            .with_member(Member::field("audit", ValueType::named("bool")).default_value(false)),
        Declaration::enumeration("Role", ["ADMIN", "USER"]),
        Declaration::class("Directives")
            .with_member(
                Member::method("upper", ValueType::named("void"))
                    .directive_definition("UpperWiring", vec![DirectiveLocation::FieldDefinition])
                    .with_parameter(
                        Parameter::new("enabled", ValueType::named("bool")).default_value(true),
                    ),
            )
            .with_member(
                Member::method("lower", ValueType::named("void"))
                    .directive_definition("LowerWiring", vec![DirectiveLocation::FieldDefinition]),
            ),
        Declaration::class("Account")
            .with_member(Member::method("getId", ValueType::named("String")).graphql_field())
            .with_member(
                Member::method("getSecret", ValueType::named("String"))
                    .graphql_field()
                    .with_directive(
                        DirectiveUse::new("auth").with_argument("role", Value::Enum("ADMIN".into())),
                    ),
            ),
        Declaration::class("Profile")
            .with_member(Member::field("bio", ValueType::named("String")).graphql_field()),
        Declaration::class("BadDirective")
            .directive_definition("W", vec![DirectiveLocation::Object])
            .with_member(Member::field("target", ValueType::named("ProfileHandle"))),
    ]
    .into_iter()
    .collect()
}

#[test]
fn directive_from_declaration() {
    let mut processor = AnnotationsProcessor::new(catalog());
    let auth = processor.directive("Auth").unwrap();

    assert_eq!(auth.name, "auth");
    assert_eq!(auth.arguments[0].ty.to_string(), "Role!");
    assert_eq!(auth.arguments[1].default_value, Some(Value::Bool(false)));
    assert!(processor.type_registry().contains_key("Role"));
    assert_eq!(
        processor.container().directives().get("auth").unwrap().wiring,
        "AuthWiring"
    );
}

#[test]
fn directives_from_methods() {
    let mut processor = AnnotationsProcessor::new(catalog());
    let built = processor.directives("Directives").unwrap();

    let names: Vec<_> = built.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["upper", "lower"]);
    assert_eq!(built[0].arguments[0].default_value, Some(Value::Bool(true)));
    assert!(built[1].arguments.is_empty());
}

#[test]
fn unmarked_declaration_rejected() {
    let mut processor = AnnotationsProcessor::new(catalog());
    let err = processor.directive("Account").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotDirectiveDefinition { .. }));
    assert_eq!(err.declaration(), Some("Account"));
}

#[test]
fn object_arguments_rejected() {
    let mut processor = AnnotationsProcessor::new(catalog());
    processor.object("Profile").unwrap();
    processor.register_type_function(MappingRule::to_type(TypeRef::named("Profile"), |ty, _| {
        ty.as_named() == Some("ProfileHandle")
    }));

    let err = processor.directive("BadDirective").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidDirectiveArgument { .. }));
    assert!(processor.type_registry().is_empty());
}

#[test]
fn applied_directive_requires_definition() {
    let mut processor = AnnotationsProcessor::new(catalog());
    let err = processor.object("Account").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnknownDirective { ref target, .. } if target == "Account.secret"
    ));

    processor.directive("Auth").unwrap();
    let account = processor.object("Account").unwrap();
    let secret = account.field("secret").unwrap();
    assert_eq!(secret.directives[0].name, "auth");
    assert!(account.field("id").unwrap().directives.is_empty());
}

#[test]
fn unvalidated_directives_pass_through() {
    let config = ProcessorConfig::default().with_directive_validation(false);
    let mut processor = AnnotationsProcessor::with_config(catalog(), config);
    let account = processor.object("Account").unwrap();
    assert_eq!(account.field("secret").unwrap().directives.len(), 1);
}

#[test]
fn redefinition_last_write_wins() {
    let catalog = catalog().with(
        Declaration::class("AuthV2")
            .named("auth")
            .directive_definition("AuthWiringV2", vec![DirectiveLocation::Object]),
    );
    let mut processor = AnnotationsProcessor::new(catalog);
    processor.directive("Auth").unwrap();
    processor.directive("AuthV2").unwrap();

    let auth = processor.container().directives().get("auth").unwrap();
    assert_eq!(auth.wiring, "AuthWiringV2");
    assert_eq!(processor.container().directives().len(), 1);
}

#[test]
fn strict_config_rejects_redefinition() {
    let catalog = catalog().with(
        Declaration::class("AuthV2")
            .named("auth")
            .directive_definition("AuthWiringV2", vec![DirectiveLocation::Object]),
    );
    let mut processor = AnnotationsProcessor::with_config(catalog, ProcessorConfig::strict());
    processor.directive("Auth").unwrap();
    let err = processor.directive("AuthV2").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NameCollision { .. }));
}

//! Integration tests for schema naming rules

use annograph_foundation::{is_valid_graphql_name, strip_accessor_prefix, to_graphql_name};
use proptest::prelude::*;

#[test]
fn host_names_normalized() {
    assert_eq!(to_graphql_name("Outer$Inner"), "Outer_Inner");
    assert_eq!(to_graphql_name("com.example.User"), "com_example_User");
    assert_eq!(to_graphql_name("2fa"), "_2fa");
    assert_eq!(to_graphql_name("valid_Name1"), "valid_Name1");
}

#[test]
fn accessor_prefixes() {
    assert_eq!(strip_accessor_prefix("getName"), "name");
    assert_eq!(strip_accessor_prefix("isActive"), "active");
    assert_eq!(strip_accessor_prefix("getURL"), "URL");
    assert_eq!(strip_accessor_prefix("getter"), "getter");
    assert_eq!(strip_accessor_prefix("island"), "island");
    assert_eq!(strip_accessor_prefix("get"), "get");
}

#[test]
fn stripped_accessors_stay_valid() {
    for host in ["getFirst$Name", "is2FA", "getX"] {
        let name = to_graphql_name(&strip_accessor_prefix(host));
        assert!(is_valid_graphql_name(&name), "{host} -> {name}");
    }
}

proptest! {
    #[test]
    fn getter_prefix_lowercases_property(property in "[A-Z][a-z]{1,8}") {
        let stripped = strip_accessor_prefix(&format!("get{property}"));
        let mut expected = property.clone();
        expected[..1].make_ascii_lowercase();
        prop_assert_eq!(stripped, expected);
    }

    #[test]
    fn qualified_host_names_valid(parts in prop::collection::vec("[a-z][a-zA-Z0-9$]{0,6}", 1..5)) {
        let host = parts.join(".");
        prop_assert!(is_valid_graphql_name(&to_graphql_name(&host)));
    }
}

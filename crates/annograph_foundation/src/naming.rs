//! GraphQL naming rules.
//!
//! Schema names must match `[_A-Za-z][_0-9A-Za-z]*`. Host declarations may use
//! characters outside that set (nested type separators, generics, unicode), so
//! every name is normalized before it reaches the schema.

/// Accessor prefixes stripped from method-style members.
const ACCESSOR_PREFIXES: &[&str] = &["get", "is"];

/// Normalizes `name` into a valid GraphQL identifier.
///
/// Characters outside `[_0-9A-Za-z]` become `_`, and a leading digit is
/// prefixed with `_`. Already-valid names are returned unchanged.
#[must_use]
pub fn to_graphql_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    match out.chars().next() {
        None => "_".to_string(),
        Some(first) if first.is_ascii_digit() => format!("_{out}"),
        Some(_) => out,
    }
}

/// Returns true if `name` is already a valid GraphQL identifier.
#[must_use]
pub fn is_valid_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Strips a `get`/`is` accessor prefix from a method name.
///
/// The prefix is only stripped when followed by an uppercase letter, so
/// `getName` becomes `name` but `getter` and `island` are left alone. The
/// remainder is decapitalized unless it starts with two uppercase letters
/// (`getURL` stays `URL`).
#[must_use]
pub fn strip_accessor_prefix(name: &str) -> String {
    for prefix in ACCESSOR_PREFIXES {
        let Some(rest) = name.strip_prefix(prefix) else {
            continue;
        };
        let mut chars = rest.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        if !first.is_uppercase() {
            continue;
        }
        if chars.next().is_some_and(char::is_uppercase) {
            return rest.to_string();
        }
        let mut out: String = first.to_lowercase().collect();
        out.push_str(&rest[first.len_utf8()..]);
        return out;
    }
    name.to_string()
}

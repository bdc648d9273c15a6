//! Type functions: pluggable rules mapping declared value types to schema types.
//!
//! The [`TypeFunctionRegistry`] holds user rules ahead of a fixed default
//! table. Rules are tried in priority order and the first one that claims a
//! value type builds it. Registering a rule puts it in front of every rule
//! registered before it.

use std::fmt;
use std::sync::Arc;

use annograph_foundation::{Annotations, Result, ScalarType, SchemaBuildError, TypeRef, ValueType};

// =============================================================================
// AnnotationContext
// =============================================================================

/// What a type function knows about the element being typed.
#[derive(Clone, Copy, Debug)]
pub struct AnnotationContext<'a> {
    /// Annotations on the member or parameter.
    pub annotations: &'a Annotations,
    /// True when the type appears in an input position.
    pub input: bool,
    /// Host name of the declaring type.
    pub declaration: &'a str,
    /// Host name of the member (or `member.parameter`).
    pub member: &'a str,
}

impl<'a> AnnotationContext<'a> {
    /// Creates a context for an output position.
    #[must_use]
    pub fn output(annotations: &'a Annotations, declaration: &'a str, member: &'a str) -> Self {
        Self {
            annotations,
            input: false,
            declaration,
            member,
        }
    }

    /// Creates a context for an input position.
    #[must_use]
    pub fn input(annotations: &'a Annotations, declaration: &'a str, member: &'a str) -> Self {
        Self {
            annotations,
            input: true,
            declaration,
            member,
        }
    }
}

// =============================================================================
// TypeFunction
// =============================================================================

/// A rule that maps a declared value type to a schema type reference.
pub trait TypeFunction: Send + Sync {
    /// Rule name, for diagnostics.
    fn name(&self) -> &str;

    /// Returns true if this rule handles `value_type`.
    fn can_build(&self, value_type: &ValueType, ctx: &AnnotationContext<'_>) -> bool;

    /// Builds the schema type reference.
    fn build(&self, value_type: &ValueType, ctx: &AnnotationContext<'_>) -> Result<TypeRef>;

    /// Custom scalar this rule introduces, registered on first use.
    fn scalar(&self) -> Option<ScalarType> {
        None
    }
}

/// Maps a fixed set of host type names to a built-in scalar.
#[derive(Clone, Debug)]
pub struct ScalarFunction {
    scalar: &'static str,
    type_names: &'static [&'static str],
}

impl ScalarFunction {
    /// Creates a rule mapping each of `type_names` to `scalar`.
    #[must_use]
    pub const fn new(scalar: &'static str, type_names: &'static [&'static str]) -> Self {
        Self { scalar, type_names }
    }
}

impl TypeFunction for ScalarFunction {
    fn name(&self) -> &str {
        self.scalar
    }

    fn can_build(&self, value_type: &ValueType, _ctx: &AnnotationContext<'_>) -> bool {
        value_type
            .as_named()
            .is_some_and(|name| self.type_names.contains(&name))
    }

    fn build(&self, _value_type: &ValueType, _ctx: &AnnotationContext<'_>) -> Result<TypeRef> {
        Ok(TypeRef::named(self.scalar))
    }
}

/// Maps any named type on an ID-marked element to the `ID` scalar.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdFunction;

impl TypeFunction for IdFunction {
    fn name(&self) -> &str {
        "ID"
    }

    fn can_build(&self, value_type: &ValueType, ctx: &AnnotationContext<'_>) -> bool {
        ctx.annotations.id && value_type.as_named().is_some()
    }

    fn build(&self, _value_type: &ValueType, _ctx: &AnnotationContext<'_>) -> Result<TypeRef> {
        Ok(TypeRef::named("ID"))
    }
}

type Predicate = dyn Fn(&ValueType, &AnnotationContext<'_>) -> bool + Send + Sync;

/// A closure-backed rule for host-defined mappings.
///
/// ```
/// use annograph_foundation::ValueType;
/// use annograph_processor::MappingRule;
///
/// let rule = MappingRule::scalar("Money", |ty, _| ty.as_named() == Some("Decimal"));
/// # let _ = rule;
/// ```
pub struct MappingRule {
    name: String,
    matches: Box<Predicate>,
    target: TypeRef,
    scalar: Option<ScalarType>,
}

impl MappingRule {
    /// Maps matching value types onto an existing schema type.
    pub fn to_type<F>(target: TypeRef, matches: F) -> Self
    where
        F: Fn(&ValueType, &AnnotationContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: target.to_string(),
            matches: Box::new(matches),
            target,
            scalar: None,
        }
    }

    /// Maps matching value types onto a new custom scalar named `scalar`.
    pub fn scalar<F>(scalar: impl Into<String>, matches: F) -> Self
    where
        F: Fn(&ValueType, &AnnotationContext<'_>) -> bool + Send + Sync + 'static,
    {
        let scalar = ScalarType::new(scalar);
        Self {
            name: scalar.name.clone(),
            matches: Box::new(matches),
            target: TypeRef::named(scalar.name.clone()),
            scalar: Some(scalar),
        }
    }

    /// Sets the description of the published scalar.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        if let Some(scalar) = &mut self.scalar {
            scalar.description = Some(description.into());
        }
        self
    }
}

impl fmt::Debug for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingRule")
            .field("name", &self.name)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl TypeFunction for MappingRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_build(&self, value_type: &ValueType, ctx: &AnnotationContext<'_>) -> bool {
        (self.matches)(value_type, ctx)
    }

    fn build(&self, _value_type: &ValueType, _ctx: &AnnotationContext<'_>) -> Result<TypeRef> {
        Ok(self.target.clone())
    }

    fn scalar(&self) -> Option<ScalarType> {
        self.scalar.clone()
    }
}

// =============================================================================
// Default Table
// =============================================================================

const STRING_TYPES: &[&str] = &["String", "str", "&str", "char", "Character"];
const BOOLEAN_TYPES: &[&str] = &["Boolean", "bool", "boolean"];
const INT_TYPES: &[&str] = &[
    "Int", "i8", "i16", "i32", "u8", "u16", "u32", "int", "short", "byte", "Integer", "Short",
    "Byte",
];
const LONG_TYPES: &[&str] = &["Long", "i64", "u64", "isize", "usize", "long"];
const FLOAT_TYPES: &[&str] = &["Float", "f32", "f64", "float", "double", "Double"];

fn default_table() -> Vec<Arc<dyn TypeFunction>> {
    vec![
        Arc::new(IdFunction),
        Arc::new(ScalarFunction::new("String", STRING_TYPES)),
        Arc::new(ScalarFunction::new("Boolean", BOOLEAN_TYPES)),
        Arc::new(ScalarFunction::new("Int", INT_TYPES)),
        Arc::new(ScalarFunction::new("Long", LONG_TYPES)),
        Arc::new(ScalarFunction::new("Float", FLOAT_TYPES)),
    ]
}

// =============================================================================
// TypeFunctionRegistry
// =============================================================================

/// Ordered chain of type functions: custom rules first, then the defaults.
#[derive(Clone)]
pub struct TypeFunctionRegistry {
    /// Custom rules, highest priority first.
    custom: Vec<Arc<dyn TypeFunction>>,
    /// Fallback table.
    defaults: Vec<Arc<dyn TypeFunction>>,
}

impl TypeFunctionRegistry {
    /// Creates a registry holding only the default table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            custom: Vec::new(),
            defaults: default_table(),
        }
    }

    /// Registers a rule ahead of all existing rules.
    pub fn register(&mut self, rule: impl TypeFunction + 'static) {
        tracing::debug!(rule = rule.name(), "registering type function");
        self.custom.insert(0, Arc::new(rule));
    }

    /// Returns the number of custom rules.
    #[must_use]
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// Returns the first rule that claims `value_type`.
    #[must_use]
    pub fn find(
        &self,
        value_type: &ValueType,
        ctx: &AnnotationContext<'_>,
    ) -> Option<Arc<dyn TypeFunction>> {
        self.custom
            .iter()
            .chain(&self.defaults)
            .find(|rule| rule.can_build(value_type, ctx))
            .cloned()
    }

    /// Maps `value_type` through the first claiming rule.
    ///
    /// Returns the built reference together with the scalar the rule
    /// publishes, or `None` if no rule claims the type.
    pub fn try_map(
        &self,
        value_type: &ValueType,
        ctx: &AnnotationContext<'_>,
    ) -> Option<Result<(TypeRef, Option<ScalarType>)>> {
        let rule = self.find(value_type, ctx)?;
        tracing::trace!(rule = rule.name(), %value_type, "type function matched");
        Some(rule.build(value_type, ctx).map(|ty| (ty, rule.scalar())))
    }

    /// Maps `value_type` through the first claiming rule.
    ///
    /// # Errors
    ///
    /// Returns an error naming the declaring type and member if no rule,
    /// including the default table, claims the type.
    pub fn map(&self, value_type: &ValueType, ctx: &AnnotationContext<'_>) -> Result<TypeRef> {
        let (ty, _) = self.try_map(value_type, ctx).unwrap_or_else(|| {
            Err(SchemaBuildError::unresolvable_type(
                ctx.declaration,
                ctx.member,
                value_type.to_string(),
            ))
        })?;
        Ok(ty)
    }
}

impl Default for TypeFunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeFunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let custom: Vec<&str> = self.custom.iter().map(|r| r.name()).collect();
        let defaults: Vec<&str> = self.defaults.iter().map(|r| r.name()).collect();
        f.debug_struct("TypeFunctionRegistry")
            .field("custom", &custom)
            .field("defaults", &defaults)
            .finish()
    }
}

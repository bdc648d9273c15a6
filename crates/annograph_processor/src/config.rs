//! Configuration for schema processing.

/// What happens when two definitions claim the same name.
///
/// Applies to extension fields overriding base fields and to directive
/// registrations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OnCollision {
    /// The later definition replaces the earlier one.
    #[default]
    Replace,
    /// Return an error.
    Error,
}

/// Configuration for the annotations processor.
#[derive(Clone, Debug)]
pub struct ProcessorConfig {
    /// Prefix prepended to input object names.
    pub input_prefix: String,

    /// Strip `get`/`is` prefixes from method-style members.
    pub strip_accessor_prefixes: bool,

    /// Collision policy for extension fields and directives.
    pub on_collision: OnCollision,

    /// Reject directives applied before they are defined.
    pub validate_applied_directives: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            input_prefix: "Input".to_string(),
            strip_accessor_prefixes: true,
            on_collision: OnCollision::Replace,
            validate_applied_directives: true,
        }
    }
}

impl ProcessorConfig {
    /// Creates a configuration that rejects every name collision.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            on_collision: OnCollision::Error,
            ..Self::default()
        }
    }

    /// Builder method to set the input object prefix.
    #[must_use]
    pub fn with_input_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.input_prefix = prefix.into();
        self
    }

    /// Builder method to enable/disable accessor prefix stripping.
    #[must_use]
    pub fn with_accessor_stripping(mut self, strip: bool) -> Self {
        self.strip_accessor_prefixes = strip;
        self
    }

    /// Builder method to set the collision policy.
    #[must_use]
    pub fn with_on_collision(mut self, on_collision: OnCollision) -> Self {
        self.on_collision = on_collision;
        self
    }

    /// Builder method to enable/disable applied directive validation.
    #[must_use]
    pub fn with_directive_validation(mut self, validate: bool) -> Self {
        self.validate_applied_directives = validate;
        self
    }
}

//! Type extensions: secondary declarations that add or override fields on a
//! base type without modifying the base declaration.

use std::collections::HashMap;

use annograph_foundation::{Declaration, FieldDefinition, Result, SchemaBuildError};

use crate::config::OnCollision;
use crate::container::BuildContext;
use crate::fetcher;
use crate::field::{DeclarationResolver, FieldCollector};
use crate::object_info::ObjectInfoRetriever;

// =============================================================================
// ExtensionRegistry
// =============================================================================

/// Extension declarations keyed by the base type's schema name.
///
/// Extensions of one base are kept in registration order.
#[derive(Clone, Debug, Default)]
pub struct ExtensionRegistry {
    by_base: HashMap<String, Vec<String>>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `extension` with `base`. Re-registering is a no-op.
    pub fn register(&mut self, base: impl Into<String>, extension: impl Into<String>) {
        let extension = extension.into();
        let entries = self.by_base.entry(base.into()).or_default();
        if !entries.contains(&extension) {
            entries.push(extension);
        }
    }

    /// Removes `extension` from every base it extends.
    ///
    /// Returns true if anything was removed.
    pub fn unregister(&mut self, extension: &str) -> bool {
        let mut removed = false;
        self.by_base.retain(|_, entries| {
            let before = entries.len();
            entries.retain(|e| e != extension);
            removed |= entries.len() != before;
            !entries.is_empty()
        });
        removed
    }

    /// Returns the extensions registered for `base`, in registration order.
    #[must_use]
    pub fn extensions_for(&self, base: &str) -> &[String] {
        self.by_base.get(base).map_or(&[], Vec::as_slice)
    }

    /// Returns true if no extensions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_base.is_empty()
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        self.by_base.clear();
    }
}

// =============================================================================
// ExtensionsHandler
// =============================================================================

/// Registers extensions and merges their fields into base types.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtensionsHandler {
    object_info: ObjectInfoRetriever,
    collector: FieldCollector,
}

impl ExtensionsHandler {
    /// Registers `extension` against the base named by its marker.
    ///
    /// # Errors
    ///
    /// Returns an error if `extension` lacks the type-extension marker or if
    /// the base declaration is unknown.
    pub fn register_extension(
        &self,
        extension: &Declaration,
        cx: &mut BuildContext<'_>,
    ) -> Result<()> {
        let Some(base) = &extension.annotations.type_extension else {
            return Err(SchemaBuildError::not_type_extension(&extension.name));
        };
        let base_decl = cx
            .source
            .declaration(base)
            .ok_or_else(|| SchemaBuildError::unknown_declaration(base))?;
        let base_name = self.object_info.type_name(base_decl);

        tracing::debug!(extension = %extension.name, base = %base_name, "registering type extension");
        cx.container
            .extensions_mut()
            .register(base_name, extension.name.clone());
        Ok(())
    }

    /// Removes `extension` from the registry.
    ///
    /// Returns true if it was registered.
    pub fn unregister_extension(&self, extension: &Declaration, cx: &mut BuildContext<'_>) -> bool {
        let removed = cx.container.extensions_mut().unregister(&extension.name);
        if removed {
            tracing::debug!(extension = %extension.name, "unregistered type extension");
        }
        removed
    }

    /// Merges the fields of every extension of `base_name` into `fields`.
    ///
    /// A field whose name is already present replaces it in place; new fields
    /// are appended. Default fetchers are rewritten to run against the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns an error if an extension declaration is unknown, if one of its
    /// fields fails to build, or on a name collision under
    /// [`OnCollision::Error`].
    pub fn apply_extensions(
        &self,
        base_name: &str,
        fields: &mut Vec<FieldDefinition>,
        cx: &mut BuildContext<'_>,
        types: &dyn DeclarationResolver,
    ) -> Result<()> {
        let extensions = cx.container.extensions().extensions_for(base_name).to_vec();
        let source = cx.source;

        for name in extensions {
            let extension = source
                .declaration(&name)
                .ok_or_else(|| SchemaBuildError::unknown_declaration(&name))?;

            let added = self.collector.collect(extension, cx, types)?;
            tracing::debug!(
                base = %base_name,
                extension = %name,
                fields = added.len(),
                "merging extension fields"
            );

            for mut field in added {
                field.fetcher = fetcher::for_extension(extension, field.fetcher);
                match fields.iter_mut().find(|f| f.name == field.name) {
                    Some(_) if cx.config.on_collision == OnCollision::Error => {
                        return Err(SchemaBuildError::name_collision(base_name, &field.name));
                    }
                    Some(existing) => *existing = field,
                    None => fields.push(field),
                }
            }
        }
        Ok(())
    }
}

//! Content type registry.
//!
//! Holds validated content type definitions in memory. Activation (routes,
//! menus) is left to whoever reads the registry.

use std::collections::BTreeSet;
use std::sync::Arc;

use folio_sdk::types::{Capability, ContentTypeDefinition};
use tracing::{debug, info};

use crate::error::RegistrationError;
use crate::snapshot::{Snapshot, SnapshotMap};
use crate::validation::{
    MAX_CAPABILITY_TYPE_LENGTH, MAX_KEY_LENGTH, check_machine_name,
};

/// Point-in-time listing of registered content types.
pub type ContentTypes = Snapshot<ContentTypeDefinition>;

/// Registry of content types.
///
/// Cheap to clone; clones share the same underlying store.
#[derive(Clone, Default)]
pub struct ContentTypeRegistry {
    inner: Arc<SnapshotMap<ContentTypeDefinition>>,
}

impl ContentTypeRegistry {
    /// Create an empty content type registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type definition, replacing any with the same key.
    ///
    /// The definition is validated in full before anything is written.
    pub fn register(&self, def: ContentTypeDefinition) -> Result<(), RegistrationError> {
        validate(&def)?;

        let key = def.key.clone();
        let features = def.supported_features.len();
        let replaced = self.inner.insert(key.clone(), def).is_some();

        info!(type_name = %key, features, replaced, "registered content type");
        Ok(())
    }

    /// Get a content type by key.
    pub fn get(&self, key: &str) -> Option<ContentTypeDefinition> {
        self.inner.get(key).map(Arc::unwrap_or_clone)
    }

    /// List all content types, ordered by key.
    pub fn list(&self) -> ContentTypes {
        self.inner.snapshot()
    }

    /// Capability names a registered content type exposes.
    ///
    /// Empty when `key` is not registered.
    pub fn derived_capabilities(&self, key: &str) -> BTreeSet<Capability> {
        self.inner
            .get(key)
            .map(|def| def.capability_type.derive())
            .unwrap_or_default()
    }

    /// Every capability a role can meaningfully be granted right now: the
    /// base `read` capability plus those derived from each registered type.
    pub fn known_capabilities(&self) -> BTreeSet<Capability> {
        let mut known = BTreeSet::from([Capability::read()]);
        for def in &self.list() {
            known.extend(def.capability_type.derive());
        }
        known
    }

    /// Check if a content type exists.
    pub fn exists(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Get the number of registered content types.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn validate(def: &ContentTypeDefinition) -> Result<(), RegistrationError> {
    check_machine_name(&def.key, MAX_KEY_LENGTH).map_err(|reason| {
        RegistrationError::InvalidKey {
            key: def.key.clone(),
            reason,
        }
    })?;

    let missing = def.labels.missing();
    if !missing.is_empty() {
        debug!(type_name = %def.key, missing = missing.len(), "content type labels incomplete");
        return Err(RegistrationError::MissingLabels {
            key: def.key.clone(),
            missing,
        });
    }

    if def.is_public && def.url_slug.trim().is_empty() {
        return Err(RegistrationError::InvalidSlug {
            key: def.key.clone(),
        });
    }

    // Both forms end up inside capability names.
    let capability_type = &def.capability_type;
    for form in [&capability_type.singular, &capability_type.plural] {
        check_machine_name(form, MAX_CAPABILITY_TYPE_LENGTH).map_err(|reason| {
            RegistrationError::InvalidKey {
                key: def.key.clone(),
                reason: format!("capability type '{form}' {reason}"),
            }
        })?;
    }

    Ok(())
}

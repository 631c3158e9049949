//! Registry handle owning both registries.

use crate::config::Config;
use crate::content::ContentTypeRegistry;
use crate::role::RoleRegistry;

/// Content type and role registries for one process.
///
/// Constructed once and passed to whatever runs the bootstrap and whatever
/// reads the result. Clones share state.
#[derive(Clone)]
pub struct Registry {
    content_types: ContentTypeRegistry,
    roles: RoleRegistry,
}

impl Registry {
    /// Default registries; roles are checked against registered content types.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        let content_types = ContentTypeRegistry::new();
        let checked = config
            .capability_warnings
            .then(|| content_types.clone());
        let roles = RoleRegistry::with_options(config.reserved_roles.iter().cloned(), checked);

        Self {
            content_types,
            roles,
        }
    }

    pub fn content_types(&self) -> &ContentTypeRegistry {
        &self.content_types
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

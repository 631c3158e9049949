//! Role registry.
//!
//! Roles map a name to a complete set of granted capabilities. Writes always
//! replace the whole role; readers see either the old or the new definition.

use std::collections::BTreeSet;
use std::sync::Arc;

use folio_sdk::types::{Capability, RoleDefinition};
use tracing::{info, warn};

use crate::content::ContentTypeRegistry;
use crate::error::RegistrationError;
use crate::snapshot::{Snapshot, SnapshotMap};
use crate::validation::{MAX_ROLE_NAME_LENGTH, check_machine_name};

/// Well-known role names.
pub mod well_known {
    /// Site administrator; bypasses capability checks in the host platform.
    pub const ADMINISTRATOR: &str = "administrator";

    /// Role assigned to unauthenticated visitors.
    pub const ANONYMOUS: &str = "anonymous";

    /// Role assigned to every logged-in user.
    pub const AUTHENTICATED: &str = "authenticated";

    /// Names that cannot be claimed through the registry by default.
    pub const RESERVED: [&str; 3] = [ADMINISTRATOR, ANONYMOUS, AUTHENTICATED];
}

/// Point-in-time listing of registered roles.
pub type Roles = Snapshot<RoleDefinition>;

/// Registry of roles.
///
/// Cheap to clone; clones share the same underlying store.
#[derive(Clone)]
pub struct RoleRegistry {
    inner: Arc<RoleRegistryInner>,
}

struct RoleRegistryInner {
    roles: SnapshotMap<RoleDefinition>,

    /// Names `upsert_role` refuses.
    reserved: BTreeSet<String>,

    /// Source of known capabilities for unknown-capability warnings.
    /// `None` disables the check.
    content_types: Option<ContentTypeRegistry>,
}

impl RoleRegistry {
    /// Create a registry with the default reserved names and no capability
    /// checking.
    pub fn new() -> Self {
        Self::with_options(well_known::RESERVED.map(String::from), None)
    }

    /// Create a registry with an explicit reserved-name set.
    ///
    /// When `content_types` is given, roles granting capabilities that no
    /// registered content type provides are logged as warnings. They are
    /// still stored, since types and roles may be declared in either order.
    pub fn with_options(
        reserved: impl IntoIterator<Item = String>,
        content_types: Option<ContentTypeRegistry>,
    ) -> Self {
        Self {
            inner: Arc::new(RoleRegistryInner {
                roles: SnapshotMap::new(),
                reserved: reserved.into_iter().collect(),
                content_types,
            }),
        }
    }

    /// Create or fully replace a role.
    ///
    /// Capabilities held by a previous definition but absent from
    /// `capabilities` are revoked.
    pub fn upsert_role<I, C>(
        &self,
        name: &str,
        display_name: &str,
        capabilities: I,
    ) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        self.upsert(RoleDefinition::new(name, display_name, capabilities))
    }

    /// Create or fully replace a role from a complete definition.
    pub fn upsert(&self, role: RoleDefinition) -> Result<(), RegistrationError> {
        self.validate_name(&role.name)?;
        validate_capabilities(&role)?;

        let unknown = self.unknown_capabilities(&role);
        if !unknown.is_empty() {
            warn!(
                role = %role.name,
                unknown = ?unknown.iter().map(Capability::as_str).collect::<Vec<_>>(),
                "role grants capabilities no registered content type provides"
            );
        }

        let name = role.name.clone();
        let capabilities = role.capabilities.len();
        let replaced = self.inner.roles.insert(name.clone(), role).is_some();

        info!(role = %name, capabilities, replaced, "role upserted");
        Ok(())
    }

    /// Get a role by name.
    pub fn get(&self, name: &str) -> Option<RoleDefinition> {
        self.inner.roles.get(name).map(Arc::unwrap_or_clone)
    }

    /// Check whether a role grants a capability. False if the role is absent.
    pub fn has_capability(&self, name: &str, capability: &str) -> bool {
        self.inner
            .roles
            .get(name)
            .is_some_and(|role| role.has_capability(capability))
    }

    /// List all roles, ordered by name.
    pub fn list(&self) -> Roles {
        self.inner.roles.snapshot()
    }

    /// Capabilities of `role` that no registered content type provides.
    ///
    /// Always empty when the registry was built without a content type
    /// registry to check against.
    pub fn unknown_capabilities(&self, role: &RoleDefinition) -> Vec<Capability> {
        let Some(content_types) = &self.inner.content_types else {
            return Vec::new();
        };

        let known = content_types.known_capabilities();
        role.capabilities
            .iter()
            .filter(|c| !known.contains(*c))
            .cloned()
            .collect()
    }

    /// Check if a name is reserved.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.inner.reserved.contains(name)
    }

    pub fn len(&self) -> usize {
        self.inner.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.roles.is_empty()
    }

    fn validate_name(&self, name: &str) -> Result<(), RegistrationError> {
        check_machine_name(name, MAX_ROLE_NAME_LENGTH).map_err(|reason| {
            RegistrationError::InvalidRoleName {
                name: name.to_string(),
                reason,
            }
        })?;

        if self.is_reserved(name) {
            return Err(RegistrationError::InvalidRoleName {
                name: name.to_string(),
                reason: "name is reserved by the platform".to_string(),
            });
        }

        Ok(())
    }
}

fn validate_capabilities(role: &RoleDefinition) -> Result<(), RegistrationError> {
    let bad = role
        .capabilities
        .iter()
        .find(|c| c.as_str().is_empty() || c.as_str().contains(char::is_whitespace));

    match bad {
        Some(capability) => Err(RegistrationError::InvalidCapability {
            role: role.name.clone(),
            capability: capability.to_string(),
        }),
        None => Ok(()),
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

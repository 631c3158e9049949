//! Parser for `.toml` definition manifests.
//!
//! A manifest declares extra content types and roles to register after the
//! built-in ones:
//!
//! ```toml
//! [[content_types]]
//! key = "magazine"
//! singular = "Magazine"
//! features = ["title", "editor"]
//!
//! [[roles]]
//! name = "archivist"
//! display_name = "Archivist"
//! capabilities = ["read", "read_magazines"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use folio_sdk::types::{
    CapabilityType, ContentTypeDefinition, Feature, LabelKey, Labels, RoleDefinition,
};
use serde::Deserialize;

/// Definitions parsed from a manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub content_types: Vec<ContentTypeEntry>,

    #[serde(default)]
    pub roles: Vec<RoleEntry>,
}

/// A content type as written in a manifest.
///
/// Only `key` and `singular` are required; labels are generated from the
/// singular/plural names and may be overridden one by one.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentTypeEntry {
    pub key: String,
    pub singular: String,

    /// Plural display name (default: singular + "s").
    #[serde(default)]
    pub plural: Option<String>,

    /// Label overrides keyed by label name (e.g. `not_found`).
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(default = "default_true")]
    pub public: bool,

    /// Default: same as `public`.
    #[serde(default)]
    pub queryable: Option<bool>,

    /// Default: same as `public`.
    #[serde(default)]
    pub show_in_ui: Option<bool>,

    /// Default: same as `show_in_ui`.
    #[serde(default)]
    pub show_in_menu: Option<bool>,

    #[serde(default = "default_true")]
    pub query_var: bool,

    #[serde(default)]
    pub has_archive: bool,

    #[serde(default)]
    pub hierarchical: bool,

    #[serde(default)]
    pub menu_position: Option<i32>,

    /// URL slug (default: key).
    #[serde(default)]
    pub slug: Option<String>,

    /// Capability namespace (default: key).
    #[serde(default)]
    pub capability_type: Option<String>,

    /// Plural used in capability names (default: capability_type + "s").
    #[serde(default)]
    pub capability_plural: Option<String>,

    #[serde(default)]
    pub features: Vec<Feature>,
}

fn default_true() -> bool {
    true
}

/// A role as written in a manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleEntry {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl Manifest {
    /// Parse a manifest file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse_str(&content, path)
    }

    /// Parse a manifest from a TOML string. `path` is only used in errors.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)
            .with_context(|| format!("failed to parse manifest TOML at {}", path.display()))?;

        manifest.validate(path)?;
        Ok(manifest)
    }

    /// Validate the parsed manifest.
    ///
    /// Registration-level rules (key format, reserved roles) are left to the
    /// registries; this only rejects what the file format itself can't carry.
    fn validate(&self, path: &Path) -> Result<()> {
        for entry in &self.content_types {
            for name in entry.labels.keys() {
                if LabelKey::parse(name).is_none() {
                    let known: Vec<&str> = LabelKey::ALL.iter().map(|k| k.as_str()).collect();
                    anyhow::bail!(
                        "content type '{}' in {} overrides unknown label '{}'. Known labels: {}",
                        entry.key,
                        path.display(),
                        name,
                        known.join(", ")
                    );
                }
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty() && self.roles.is_empty()
    }
}

impl ContentTypeEntry {
    /// Expand the entry into a full definition, filling defaults.
    pub fn to_definition(&self) -> ContentTypeDefinition {
        let plural = self
            .plural
            .clone()
            .unwrap_or_else(|| format!("{}s", self.singular));

        let mut labels = Labels::from_names(&self.singular, &plural);
        for (name, value) in &self.labels {
            if let Some(key) = LabelKey::parse(name) {
                labels.insert(key, value.clone());
            }
        }

        let namespace = self.capability_type.as_deref().unwrap_or(&self.key);
        let capability_type = match &self.capability_plural {
            Some(plural) => CapabilityType::with_plural(namespace, plural.as_str()),
            None => CapabilityType::new(namespace),
        };

        let show_in_ui = self.show_in_ui.unwrap_or(self.public);

        ContentTypeDefinition {
            key: self.key.clone(),
            labels,
            is_public: self.public,
            is_queryable: self.queryable.unwrap_or(self.public),
            show_in_admin_ui: show_in_ui,
            show_in_admin_menu: self.show_in_menu.unwrap_or(show_in_ui),
            query_var: self.query_var,
            has_archive: self.has_archive,
            is_hierarchical: self.hierarchical,
            menu_position: self.menu_position,
            url_slug: self.slug.clone().unwrap_or_else(|| self.key.clone()),
            capability_type,
            supported_features: self.features.iter().copied().collect(),
        }
    }
}

impl RoleEntry {
    pub fn to_definition(&self) -> RoleDefinition {
        RoleDefinition::new(
            self.name.as_str(),
            self.display_name.as_str(),
            self.capabilities.iter().map(String::as_str),
        )
    }
}

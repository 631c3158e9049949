//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::role::well_known;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Optional TOML manifest with extra content types and roles
    /// (FOLIO_MANIFEST).
    pub manifest: Option<PathBuf>,

    /// Role names the registry refuses (FOLIO_RESERVED_ROLES, comma-separated,
    /// default: administrator,anonymous,authenticated).
    pub reserved_roles: Vec<String>,

    /// Warn when a role grants capabilities no content type provides
    /// (FOLIO_CAPABILITY_WARNINGS, default: true).
    pub capability_warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: None,
            reserved_roles: well_known::RESERVED.map(String::from).to_vec(),
            capability_warnings: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let manifest = lookup("FOLIO_MANIFEST")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let reserved_roles = lookup("FOLIO_RESERVED_ROLES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| well_known::RESERVED.map(String::from).to_vec());

        let capability_warnings = lookup("FOLIO_CAPABILITY_WARNINGS")
            .unwrap_or_else(|| "true".to_string())
            .trim()
            .to_lowercase()
            .parse()
            .context("FOLIO_CAPABILITY_WARNINGS must be 'true' or 'false'")?;

        Ok(Self {
            manifest,
            reserved_roles,
            capability_warnings,
        })
    }
}

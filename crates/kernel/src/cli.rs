//! CLI command implementations.
//!
//! Each command works on an already bootstrapped [`Registry`] and writes to
//! the given output.

use std::io::Write;

use anyhow::{Context, Result};
use folio_sdk::types::{ContentTypeDefinition, LabelKey, RoleDefinition};

use crate::registry::Registry;

/// Print a one-line summary of what is registered.
pub fn cmd_summary(registry: &Registry, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "Registered {} content type(s) and {} role(s).",
        registry.content_types().len(),
        registry.roles().len()
    )?;
    Ok(())
}

/// List registered content types.
pub fn cmd_types(registry: &Registry, json: bool, out: &mut impl Write) -> Result<()> {
    let types = registry.content_types().list();

    if json {
        let defs: Vec<&ContentTypeDefinition> = types.iter().collect();
        serde_json::to_writer_pretty(&mut *out, &defs)
            .context("failed to serialize content types")?;
        writeln!(out)?;
        return Ok(());
    }

    if types.is_empty() {
        writeln!(out, "No content types registered.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<20} {:<20} {:<20} {:<8} {}",
        "TYPE", "NAME", "SLUG", "PUBLIC", "FEATURES"
    )?;
    writeln!(out, "{}", "-".repeat(80))?;

    for def in &types {
        let features: Vec<&str> = def.supported_features.iter().map(|f| f.as_str()).collect();
        writeln!(
            out,
            "{:<20} {:<20} {:<20} {:<8} {}",
            def.key,
            def.labels.get(LabelKey::Name).unwrap_or("-"),
            def.url_slug,
            if def.is_public { "yes" } else { "no" },
            features.join(",")
        )?;
    }

    Ok(())
}

/// List roles and their capabilities.
pub fn cmd_roles(registry: &Registry, json: bool, out: &mut impl Write) -> Result<()> {
    let roles = registry.roles().list();

    if json {
        let defs: Vec<&RoleDefinition> = roles.iter().collect();
        serde_json::to_writer_pretty(&mut *out, &defs).context("failed to serialize roles")?;
        writeln!(out)?;
        return Ok(());
    }

    if roles.is_empty() {
        writeln!(out, "No roles registered.")?;
        return Ok(());
    }

    for role in &roles {
        writeln!(out, "{} ({})", role.name, role.display_name)?;
        for capability in &role.capabilities {
            writeln!(out, "  {capability}")?;
        }
    }

    Ok(())
}

/// Report whether `role` grants `capability`. Returns the answer so the
/// caller can pick an exit status.
pub fn cmd_check(
    registry: &Registry,
    role: &str,
    capability: &str,
    out: &mut impl Write,
) -> Result<bool> {
    let granted = registry.roles().has_capability(role, capability);
    let verdict = if granted { "granted" } else { "denied" };
    writeln!(out, "{role}: {capability} {verdict}")?;
    Ok(granted)
}

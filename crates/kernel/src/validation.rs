//! Identifier checks shared by content type keys, capability types and role
//! names.

use std::sync::LazyLock;

use regex::Regex;

/// Lowercase machine-name characters.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static MACHINE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid regex literal"));

/// Maximum content type key length; keys end up in URLs and storage keys.
pub const MAX_KEY_LENGTH: usize = 20;

/// Maximum role name length.
pub const MAX_ROLE_NAME_LENGTH: usize = 64;

/// Maximum length of either form of a capability type.
pub const MAX_CAPABILITY_TYPE_LENGTH: usize = 64;

/// Check `value` is a non-empty machine name of at most `max_len` bytes.
///
/// Returns the reason on failure.
pub fn check_machine_name(value: &str, max_len: usize) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.len() > max_len {
        return Err(format!("must be at most {max_len} characters"));
    }
    if !MACHINE_NAME.is_match(value) {
        return Err("may only contain lowercase letters, digits, and underscores".to_string());
    }
    Ok(())
}

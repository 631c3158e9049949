//! Registration error types.

use folio_sdk::types::LabelKey;
use thiserror::Error;

/// Validation failures raised when registering a content type or role.
///
/// All variants are detected synchronously and are not retryable; the caller
/// has to fix the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("invalid content type key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("content type '{key}' is missing labels: {}", join_labels(.missing))]
    MissingLabels { key: String, missing: Vec<LabelKey> },

    #[error("content type '{key}' is public but has an empty URL slug")]
    InvalidSlug { key: String },

    #[error("invalid role name '{name}': {reason}")]
    InvalidRoleName { name: String, reason: String },

    #[error("role '{role}' grants an empty or whitespace-containing capability '{capability}'")]
    InvalidCapability { role: String, capability: String },
}

fn join_labels(keys: &[LabelKey]) -> String {
    keys.iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_labels_message_lists_keys() {
        let err = RegistrationError::MissingLabels {
            key: "book".to_string(),
            missing: vec![LabelKey::Name, LabelKey::NotFound],
        };
        assert_eq!(
            err.to_string(),
            "content type 'book' is missing labels: name, not_found"
        );
    }
}

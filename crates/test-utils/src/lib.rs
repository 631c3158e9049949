//! Folio test utilities.
//!
//! Fixture builders for content type and role definitions, and assertion
//! helpers for capability sets.

use folio_sdk::types::{
    CapabilityType, ContentTypeDefinition, Feature, LabelKey, Labels, RoleDefinition,
};

/// Create a test content type with generated labels.
///
/// `key` doubles as the singular display name, capitalized.
pub fn test_content_type(key: &str) -> TestContentType {
    let singular = capitalize(key);
    let plural = format!("{singular}s");
    TestContentType {
        def: ContentTypeDefinition::new(key, Labels::from_names(&singular, &plural)),
    }
}

/// A content type builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestContentType {
    def: ContentTypeDefinition,
}

impl TestContentType {
    /// Set a custom key, leaving labels and slug untouched.
    pub fn with_key(mut self, key: &str) -> Self {
        self.def.key = key.to_string();
        self
    }

    /// Override one label.
    pub fn with_label(mut self, key: LabelKey, value: &str) -> Self {
        self.def.labels.insert(key, value);
        self
    }

    /// Drop one label.
    pub fn without_label(mut self, key: LabelKey) -> Self {
        self.def.labels.remove(key);
        self
    }

    /// Set the URL slug.
    pub fn with_slug(mut self, slug: &str) -> Self {
        self.def.url_slug = slug.to_string();
        self
    }

    /// Set the capability namespace plural.
    pub fn with_capability_plural(mut self, plural: &str) -> Self {
        let singular = self.def.capability_type.singular.clone();
        self.def.capability_type = CapabilityType::with_plural(singular, plural);
        self
    }

    /// Set as private (not public, hidden from admin UI).
    pub fn private(mut self) -> Self {
        self.def = self.def.private();
        self
    }

    /// Add supported features.
    pub fn with_features(mut self, features: &[Feature]) -> Self {
        self.def = self.def.features(features.iter().copied());
        self
    }

    pub fn build(self) -> ContentTypeDefinition {
        self.def
    }
}

/// Create a test role definition.
pub fn test_role(name: &str, capabilities: &[&str]) -> RoleDefinition {
    RoleDefinition::new(name, capitalize(name), capabilities.iter().copied())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Assertion helpers for capability sets.
pub mod assert {
    use folio_sdk::types::RoleDefinition;

    /// Assert that a role holds exactly the given capabilities.
    pub fn capabilities_eq(role: &RoleDefinition, expected: &[&str]) {
        let mut actual: Vec<&str> = role.capabilities.iter().map(|c| c.as_str()).collect();
        let mut expected = expected.to_vec();
        actual.sort_unstable();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(
            actual, expected,
            "capability mismatch for role '{}'",
            role.name
        );
    }

    /// Assert that a role holds a capability.
    pub fn grants(role: &RoleDefinition, capability: &str) {
        assert!(
            role.has_capability(capability),
            "Expected role '{}' to grant '{}', got: {:?}",
            role.name,
            capability,
            role.capabilities
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn content_type_fixture_is_complete() {
        let def = test_content_type("magazine").build();
        assert_eq!(def.key, "magazine");
        assert_eq!(def.labels.get(LabelKey::SingularName), Some("Magazine"));
        assert_eq!(def.labels.get(LabelKey::Name), Some("Magazines"));
        assert!(def.labels.missing().is_empty());
    }

    #[test]
    fn builder_overrides() {
        let def = test_content_type("story")
            .with_capability_plural("stories")
            .without_label(LabelKey::NotFound)
            .with_features(&[Feature::Title])
            .private()
            .build();

        assert_eq!(def.capability_type.plural, "stories");
        assert_eq!(def.labels.missing(), vec![LabelKey::NotFound]);
        assert!(def.supports(Feature::Title));
        assert!(!def.is_public);
    }

    #[test]
    fn role_fixture() {
        let role = test_role("clerk", &["read", "edit_books"]);
        assert_eq!(role.display_name, "Clerk");
        assert::capabilities_eq(&role, &["edit_books", "read"]);
        assert::grants(&role, "read");
    }
}

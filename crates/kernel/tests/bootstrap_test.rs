//! End-to-end tests for the startup bootstrap.

use std::io::Write;

use folio_kernel::bootstrap::{BOOK_TYPE, LIBRARIAN_CAPABILITIES, LIBRARIAN_ROLE};
use folio_kernel::config::Config;
use folio_kernel::manifest::Manifest;
use folio_kernel::{Bootstrap, RegistrationError, Registry};
use folio_sdk::types::{Capability, Feature, LabelKey, RoleDefinition};
use folio_test_utils::assert;

fn manifest(toml: &str) -> Manifest {
    Manifest::parse_str(toml, std::path::Path::new("test.toml")).unwrap()
}

// ============================================================================
// Built-in definitions
// ============================================================================

#[test]
fn bootstrap_registers_book_and_librarian() {
    let registry = Registry::new();
    Bootstrap::new().run(&registry).unwrap();

    let librarian = registry.roles().get(LIBRARIAN_ROLE).unwrap();
    assert_eq!(librarian.display_name, "Librarian");
    assert::capabilities_eq(
        &librarian,
        &[
            "read",
            "read_books",
            "read_private_books",
            "edit_books",
            "edit_others_books",
            "edit_published_books",
            "publish_books",
            "delete_others_books",
            "delete_private_books",
            "delete_published_books",
        ],
    );

    let book = registry.content_types().get(BOOK_TYPE).unwrap();
    assert_eq!(book.labels.get(LabelKey::SingularName), Some("Book"));
    assert_eq!(book.labels.get(LabelKey::ParentItemColon), Some("Parent Books:"));
    assert_eq!(book.url_slug, "book");
    assert!(book.supports(Feature::Thumbnail));
}

#[test]
fn librarian_capabilities_are_book_capabilities_plus_read() {
    let registry = Registry::new();
    Bootstrap::new().run(&registry).unwrap();

    let mut expected = registry.content_types().derived_capabilities(BOOK_TYPE);
    expected.insert("read".into());

    assert_eq!(
        registry.roles().get(LIBRARIAN_ROLE).unwrap().capabilities,
        expected
    );
    assert_eq!(expected.len(), LIBRARIAN_CAPABILITIES.len());
}

#[test]
fn bootstrap_twice_is_idempotent() {
    let registry = Registry::new();
    let bootstrap = Bootstrap::new();

    bootstrap.run(&registry).unwrap();
    let types_once: Vec<_> = registry.content_types().list().iter().cloned().collect();
    let roles_once: Vec<_> = registry.roles().list().iter().cloned().collect();

    bootstrap.run(&registry).unwrap();
    let types_twice: Vec<_> = registry.content_types().list().iter().cloned().collect();
    let roles_twice: Vec<_> = registry.roles().list().iter().cloned().collect();

    assert_eq!(types_once, types_twice);
    assert_eq!(roles_once, roles_twice);
}

#[test]
fn bootstrap_fails_when_librarian_is_reserved() {
    let config = Config {
        reserved_roles: vec!["librarian".to_string()],
        ..Config::default()
    };
    let registry = Registry::from_config(&config);

    let err = Bootstrap::new().run(&registry).unwrap_err();
    assert!(matches!(err, RegistrationError::InvalidRoleName { .. }));
    assert!(registry.roles().is_empty());
}

#[test]
fn capability_warnings_follow_config() {
    let scribe = RoleDefinition::new("scribe", "Scribe", ["read_books", "edit_scrolls"]);

    let checked = Registry::from_config(&Config::from_lookup(|_| None).unwrap());
    Bootstrap::new().run(&checked).unwrap();
    assert_eq!(
        checked.roles().unknown_capabilities(&scribe),
        vec![Capability::new("edit_scrolls")]
    );

    let unchecked = Registry::from_config(
        &Config::from_lookup(|name| {
            (name == "FOLIO_CAPABILITY_WARNINGS").then(|| "false".to_string())
        })
        .unwrap(),
    );
    Bootstrap::new().run(&unchecked).unwrap();
    assert!(unchecked.roles().unknown_capabilities(&scribe).is_empty());

    unchecked.roles().upsert(scribe).unwrap();
    assert!(unchecked.roles().has_capability("scribe", "edit_scrolls"));
}

// ============================================================================
// Manifest
// ============================================================================

#[test]
fn bootstrap_applies_manifest_after_builtins() {
    let registry = Registry::new();
    let extra = manifest(
        r#"
[[content_types]]
key = "magazine"
singular = "Magazine"
features = ["title"]

[[roles]]
name = "archivist"
display_name = "Archivist"
capabilities = ["read", "read_magazines", "read_books"]
"#,
    );

    Bootstrap::new()
        .with_manifest(extra)
        .run(&registry)
        .unwrap();

    assert_eq!(registry.content_types().len(), 2);
    assert_eq!(registry.roles().len(), 2);
    assert!(registry.roles().has_capability("archivist", "read_magazines"));
    assert!(registry.roles().has_capability(LIBRARIAN_ROLE, "publish_books"));
}

#[test]
fn manifest_can_replace_librarian() {
    let registry = Registry::new();
    let extra = manifest(
        r#"
[[roles]]
name = "librarian"
display_name = "Librarian"
capabilities = ["read", "read_books"]
"#,
    );

    Bootstrap::new()
        .with_manifest(extra)
        .run(&registry)
        .unwrap();

    assert!(registry.roles().has_capability(LIBRARIAN_ROLE, "read_books"));
    assert!(!registry.roles().has_capability(LIBRARIAN_ROLE, "publish_books"));
}

#[test]
fn invalid_manifest_type_aborts_bootstrap() {
    let registry = Registry::new();
    let extra = manifest(
        r#"
[[content_types]]
key = "Bad-Key"
singular = "Bad"

[[roles]]
name = "archivist"
display_name = "Archivist"
capabilities = ["read"]
"#,
    );

    let err = Bootstrap::new()
        .with_manifest(extra)
        .run(&registry)
        .unwrap_err();

    assert!(matches!(err, RegistrationError::InvalidKey { .. }));
    assert!(registry.roles().get("archivist").is_none());
}

#[test]
fn manifest_capability_type_must_be_a_machine_name() {
    let registry = Registry::new();
    let extra = manifest(
        r#"
[[content_types]]
key = "rare_book"
singular = "Rare Book"
capability_type = "Rare Book"
"#,
    );

    let err = Bootstrap::new()
        .with_manifest(extra)
        .run(&registry)
        .unwrap_err();

    assert!(matches!(err, RegistrationError::InvalidKey { ref key, .. } if key == "rare_book"));
    assert!(!registry.content_types().exists("rare_book"));
    assert!(
        !registry
            .content_types()
            .known_capabilities()
            .iter()
            .any(|c| c.as_str().contains(' '))
    );
}

#[test]
fn manifest_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[content_types]]
key = "zine"
singular = "Zine"
slug = "zines"
"#
    )
    .unwrap();

    let loaded = Manifest::load(file.path()).unwrap();
    let registry = Registry::new();
    Bootstrap::new()
        .with_manifest(loaded)
        .run(&registry)
        .unwrap();

    assert_eq!(registry.content_types().get("zine").unwrap().url_slug, "zines");
}

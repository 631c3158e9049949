//! Core definition types for Folio.
//!
//! These types describe content types and roles as plain data. They carry no
//! validation of their own; the kernel registries validate on registration.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label purposes every content type must provide a display string for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKey {
    Name,
    SingularName,
    MenuName,
    NameAdminBar,
    AddNew,
    AddNewItem,
    NewItem,
    EditItem,
    ViewItem,
    AllItems,
    SearchItems,
    ParentItemColon,
    NotFound,
    NotFoundInTrash,
}

impl LabelKey {
    /// All label keys, in declaration order.
    pub const ALL: [LabelKey; 14] = [
        LabelKey::Name,
        LabelKey::SingularName,
        LabelKey::MenuName,
        LabelKey::NameAdminBar,
        LabelKey::AddNew,
        LabelKey::AddNewItem,
        LabelKey::NewItem,
        LabelKey::EditItem,
        LabelKey::ViewItem,
        LabelKey::AllItems,
        LabelKey::SearchItems,
        LabelKey::ParentItemColon,
        LabelKey::NotFound,
        LabelKey::NotFoundInTrash,
    ];

    /// Look up a label key by its snake_case name.
    pub fn parse(name: &str) -> Option<LabelKey> {
        LabelKey::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// The snake_case key as it appears in manifests and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            LabelKey::Name => "name",
            LabelKey::SingularName => "singular_name",
            LabelKey::MenuName => "menu_name",
            LabelKey::NameAdminBar => "name_admin_bar",
            LabelKey::AddNew => "add_new",
            LabelKey::AddNewItem => "add_new_item",
            LabelKey::NewItem => "new_item",
            LabelKey::EditItem => "edit_item",
            LabelKey::ViewItem => "view_item",
            LabelKey::AllItems => "all_items",
            LabelKey::SearchItems => "search_items",
            LabelKey::ParentItemColon => "parent_item_colon",
            LabelKey::NotFound => "not_found",
            LabelKey::NotFoundInTrash => "not_found_in_trash",
        }
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display strings for a content type, keyed by purpose.
///
/// Strings are stored already resolved; no locale handling happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<LabelKey, String>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a complete label set from a singular and plural name.
    ///
    /// `Labels::from_names("Book", "Books")` yields "Add New Book",
    /// "No books found.", and so on. Individual entries can be overridden
    /// afterwards with [`Labels::with`].
    pub fn from_names(singular: &str, plural: &str) -> Self {
        let lower_plural = plural.to_lowercase();
        Self::new()
            .with(LabelKey::Name, plural)
            .with(LabelKey::SingularName, singular)
            .with(LabelKey::MenuName, plural)
            .with(LabelKey::NameAdminBar, singular)
            .with(LabelKey::AddNew, "Add New")
            .with(LabelKey::AddNewItem, format!("Add New {singular}"))
            .with(LabelKey::NewItem, format!("New {singular}"))
            .with(LabelKey::EditItem, format!("Edit {singular}"))
            .with(LabelKey::ViewItem, format!("View {singular}"))
            .with(LabelKey::AllItems, format!("All {plural}"))
            .with(LabelKey::SearchItems, format!("Search {plural}"))
            .with(LabelKey::ParentItemColon, format!("Parent {plural}:"))
            .with(LabelKey::NotFound, format!("No {lower_plural} found."))
            .with(
                LabelKey::NotFoundInTrash,
                format!("No {lower_plural} found in Trash."),
            )
    }

    /// Set a label, replacing any existing value.
    pub fn with(mut self, key: LabelKey, value: impl Into<String>) -> Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn insert(&mut self, key: LabelKey, value: impl Into<String>) -> Option<String> {
        self.0.insert(key, value.into())
    }

    pub fn remove(&mut self, key: LabelKey) -> Option<String> {
        self.0.remove(&key)
    }

    pub fn get(&self, key: LabelKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// Label keys with no entry, in declaration order.
    pub fn missing(&self) -> Vec<LabelKey> {
        LabelKey::ALL
            .into_iter()
            .filter(|k| !self.0.contains_key(k))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Label text, or `""` when the label is absent.
///
/// Only for display of sets already known to be complete; use
/// [`Labels::get`] or [`Labels::missing`] to detect gaps.
impl std::ops::Index<LabelKey> for Labels {
    type Output = str;

    fn index(&self, key: LabelKey) -> &str {
        self.get(key).unwrap_or("")
    }
}

/// Editing features a content type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Title,
    /// The main body editor.
    Editor,
    Author,
    Thumbnail,
    Excerpt,
    Comments,
    Trackbacks,
    CustomFields,
    Revisions,
    PageAttributes,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Title => "title",
            Feature::Editor => "editor",
            Feature::Author => "author",
            Feature::Thumbnail => "thumbnail",
            Feature::Excerpt => "excerpt",
            Feature::Comments => "comments",
            Feature::Trackbacks => "trackbacks",
            Feature::CustomFields => "custom_fields",
            Feature::Revisions => "revisions",
            Feature::PageAttributes => "page_attributes",
        }
    }
}

/// An atomic permission string checked by an authorization layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// The base capability every authenticated role is expected to hold.
    pub const READ: &'static str = "read";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn read() -> Self {
        Self::new(Self::READ)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Capability {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for Capability {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Capability actions a content type exposes, as `<prefix>_<plural>`.
pub const CAPABILITY_TEMPLATES: [&str; 9] = [
    "read",
    "read_private",
    "edit",
    "edit_others",
    "edit_published",
    "publish",
    "delete_others",
    "delete_private",
    "delete_published",
];

/// Namespace that capability names for a content type are derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityType {
    pub singular: String,
    pub plural: String,
}

impl CapabilityType {
    /// Namespace with the plural formed by appending `s`.
    pub fn new(singular: impl Into<String>) -> Self {
        let singular = singular.into();
        let plural = format!("{singular}s");
        Self { singular, plural }
    }

    pub fn with_plural(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    /// The capability names this namespace grants, one per template.
    pub fn derive(&self) -> BTreeSet<Capability> {
        CAPABILITY_TEMPLATES
            .iter()
            .map(|prefix| Capability::new(format!("{prefix}_{}", self.plural)))
            .collect()
    }
}

/// A declarative content type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDefinition {
    /// Machine name, used in URLs and storage keys.
    pub key: String,
    pub labels: Labels,
    pub is_public: bool,
    pub is_queryable: bool,
    pub show_in_admin_ui: bool,
    pub show_in_admin_menu: bool,
    pub query_var: bool,
    pub has_archive: bool,
    pub is_hierarchical: bool,
    /// Admin menu position (None = default placement).
    #[serde(default)]
    pub menu_position: Option<i32>,
    pub url_slug: String,
    pub capability_type: CapabilityType,
    #[serde(default)]
    pub supported_features: BTreeSet<Feature>,
}

impl ContentTypeDefinition {
    /// A public type with slug and capability namespace equal to `key`.
    pub fn new(key: impl Into<String>, labels: Labels) -> Self {
        let key = key.into();
        Self {
            url_slug: key.clone(),
            capability_type: CapabilityType::new(key.clone()),
            key,
            labels,
            is_public: true,
            is_queryable: true,
            show_in_admin_ui: true,
            show_in_admin_menu: true,
            query_var: true,
            has_archive: false,
            is_hierarchical: false,
            menu_position: None,
            supported_features: BTreeSet::new(),
        }
    }

    /// Hidden from the public site and admin UI.
    pub fn private(mut self) -> Self {
        self.is_public = false;
        self.is_queryable = false;
        self.show_in_admin_ui = false;
        self.show_in_admin_menu = false;
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.url_slug = slug.into();
        self
    }

    pub fn capability_type(mut self, capability_type: CapabilityType) -> Self {
        self.capability_type = capability_type;
        self
    }

    pub fn archive(mut self) -> Self {
        self.has_archive = true;
        self
    }

    pub fn hierarchical(mut self) -> Self {
        self.is_hierarchical = true;
        self
    }

    pub fn menu_position(mut self, position: i32) -> Self {
        self.menu_position = Some(position);
        self
    }

    pub fn features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.supported_features.extend(features);
        self
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.supported_features.contains(&feature)
    }
}

/// A named bundle of capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    pub display_name: String,
    pub capabilities: BTreeSet<Capability>,
}

impl RoleDefinition {
    pub fn new<I, C>(
        name: impl Into<String>,
        display_name: impl Into<String>,
        capabilities: I,
    ) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn labels_from_names_are_complete() {
        let labels = Labels::from_names("Book", "Books");
        assert!(labels.missing().is_empty());
        assert_eq!(labels.len(), LabelKey::ALL.len());
        assert_eq!(labels.get(LabelKey::AddNewItem), Some("Add New Book"));
        assert_eq!(labels.get(LabelKey::NotFound), Some("No books found."));
        assert_eq!(
            labels.get(LabelKey::NotFoundInTrash),
            Some("No books found in Trash.")
        );
        assert_eq!(&labels[LabelKey::ParentItemColon], "Parent Books:");
    }

    #[test]
    fn absent_label_is_visible_through_get_only() {
        let labels = Labels::new().with(LabelKey::Name, "Books");
        assert_eq!(labels.get(LabelKey::MenuName), None);
        assert_eq!(&labels[LabelKey::MenuName], "");
        assert!(labels.missing().contains(&LabelKey::MenuName));
    }

    #[test]
    fn labels_missing_reports_in_declaration_order() {
        let mut labels = Labels::from_names("Book", "Books");
        labels.remove(LabelKey::NotFoundInTrash);
        labels.remove(LabelKey::Name);
        assert_eq!(
            labels.missing(),
            vec![LabelKey::Name, LabelKey::NotFoundInTrash]
        );
    }

    #[test]
    fn label_key_parse_matches_as_str() {
        for key in LabelKey::ALL {
            assert_eq!(LabelKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(LabelKey::parse("singular"), None);
    }

    #[test]
    fn labels_serialize_with_snake_case_keys() {
        let labels = Labels::new().with(LabelKey::SingularName, "Book");
        let json = serde_json::to_value(&labels).unwrap();
        assert_eq!(json, serde_json::json!({"singular_name": "Book"}));
    }

    #[test]
    fn capability_type_derives_plural_names() {
        let caps = CapabilityType::new("book").derive();
        assert_eq!(caps.len(), 9);
        assert!(caps.contains("edit_others_books"));
        assert!(caps.contains("read_books"));
        assert!(!caps.contains("read"));
    }

    #[test]
    fn capability_type_respects_explicit_plural() {
        let caps = CapabilityType::with_plural("story", "stories").derive();
        assert!(caps.contains("publish_stories"));
        assert!(!caps.contains("publish_storys"));
    }

    #[test]
    fn role_definition_collapses_duplicates() {
        let role = RoleDefinition::new("clerk", "Clerk", ["read", "read", "edit_books"]);
        assert_eq!(role.capabilities.len(), 2);
        assert!(role.has_capability("read"));
        assert!(!role.has_capability("publish_books"));
    }

    #[test]
    fn content_type_defaults_follow_key() {
        let def = ContentTypeDefinition::new("book", Labels::from_names("Book", "Books"));
        assert_eq!(def.url_slug, "book");
        assert_eq!(def.capability_type.plural, "books");
        assert!(def.is_public);
        assert!(!def.supports(Feature::Title));
    }
}

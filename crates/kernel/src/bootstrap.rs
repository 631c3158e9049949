//! Startup registration of the built-in content types and roles.
//!
//! Run once from the host's initialization sequence. Running it again leaves
//! the registry in the same state.

use folio_sdk::types::{
    CapabilityType, ContentTypeDefinition, Feature, LabelKey, Labels, RoleDefinition,
};
use tracing::info;

use crate::error::RegistrationError;
use crate::manifest::Manifest;
use crate::registry::Registry;

/// Key of the built-in book content type.
pub const BOOK_TYPE: &str = "book";

/// Name of the built-in role that manages books.
pub const LIBRARIAN_ROLE: &str = "librarian";

/// Capabilities granted to the librarian role.
pub const LIBRARIAN_CAPABILITIES: [&str; 10] = [
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
];

/// The `book` content type.
pub fn book_content_type() -> ContentTypeDefinition {
    let labels = Labels::new()
        .with(LabelKey::Name, "Books")
        .with(LabelKey::SingularName, "Book")
        .with(LabelKey::MenuName, "Books")
        .with(LabelKey::NameAdminBar, "Book")
        .with(LabelKey::AddNew, "Add New")
        .with(LabelKey::AddNewItem, "Add New Book")
        .with(LabelKey::NewItem, "New Book")
        .with(LabelKey::EditItem, "Edit Book")
        .with(LabelKey::ViewItem, "View Book")
        .with(LabelKey::AllItems, "All Books")
        .with(LabelKey::SearchItems, "Search Books")
        .with(LabelKey::ParentItemColon, "Parent Books:")
        .with(LabelKey::NotFound, "No books found.")
        .with(LabelKey::NotFoundInTrash, "No books found in Trash.");

    ContentTypeDefinition::new(BOOK_TYPE, labels)
        .slug("book")
        .capability_type(CapabilityType::new("book"))
        .archive()
        .features([
            Feature::Title,
            Feature::Editor,
            Feature::Author,
            Feature::Thumbnail,
            Feature::Excerpt,
            Feature::Comments,
        ])
}

/// The `librarian` role.
pub fn librarian_role() -> RoleDefinition {
    RoleDefinition::new(LIBRARIAN_ROLE, "Librarian", LIBRARIAN_CAPABILITIES)
}

/// Registers the built-in definitions, then any manifest definitions.
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    manifest: Option<Manifest>,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also apply `manifest` after the built-in definitions.
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Register everything into `registry`.
    ///
    /// Stops at the first registration error; a half-registered startup
    /// should not go on to serve requests.
    pub fn run(&self, registry: &Registry) -> Result<(), RegistrationError> {
        registry.content_types().register(book_content_type())?;
        registry.roles().upsert(librarian_role())?;

        if let Some(manifest) = &self.manifest {
            for entry in &manifest.content_types {
                registry.content_types().register(entry.to_definition())?;
            }
            for entry in &manifest.roles {
                registry.roles().upsert(entry.to_definition())?;
            }
        }

        info!(
            content_types = registry.content_types().len(),
            roles = registry.roles().len(),
            "bootstrap complete"
        );
        Ok(())
    }
}

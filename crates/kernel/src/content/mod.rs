//! Content type management.
//!
//! This module provides:
//! - ContentTypeRegistry: validated, snapshot-readable content type definitions

mod type_registry;

pub use type_registry::{ContentTypeRegistry, ContentTypes};

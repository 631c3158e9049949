//! Folio Kernel Library
//!
//! Content type and role registries, the startup bootstrap that fills them,
//! and the pieces the `folio` binary is built from.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod role;
pub mod snapshot;
pub mod validation;

pub use bootstrap::Bootstrap;
pub use error::RegistrationError;
pub use registry::Registry;

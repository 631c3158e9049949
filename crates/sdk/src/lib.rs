//! Folio SDK
//!
//! Definition types shared by the Folio kernel and anything that declares
//! content types or roles for it: labels, features, capability namespaces,
//! and role bundles.

pub mod types;

pub mod prelude {
    pub use crate::types::*;
}

//! Roles and their capability grants.

mod registry;

pub use registry::{RoleRegistry, Roles, well_known};

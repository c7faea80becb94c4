//! Shared types for the identity core
//!
//! Domain and wire types used across the identity crates and by the UI
//! surfaces that consume them: profiles, departments, roles, permission
//! actions and the external HR record snapshot.

pub mod models;
pub mod permission;
pub mod util;

// Re-exports
pub use models::{
    Department, Employment, ExternalEmployeeRecord, Profile, ProfileCreate, ProfileUpdate, Role,
};
pub use permission::{PermissionAction, manager_defaults};
pub use serde::{Deserialize, Serialize};

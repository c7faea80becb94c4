//! Identity federation and permission resolution core
//!
//! Reconciles the external HR system of record with the local profile
//! store, provisions accounts on first federated contact, and computes the
//! effective permission set every protected surface relies on.
//!
//! Consumers wire the pieces together explicitly:
//!
//! ```ignore
//! let db = db::connect("identity_data/store").await?;
//! let profiles = ProfileRepository::new(db.clone());
//! let departments = DepartmentRepository::new(db);
//! let session = SessionService::open(&config.session_path)?;
//! let hr = HrClient::new(ClientConfig::new(&config.hr_base_url))?;
//! let resolver = IdentityResolver::new(hr, profiles, session);
//! ```

pub mod config;
pub mod db;
pub mod guard;
pub mod logging;
pub mod permissions;
pub mod resolver;
pub mod session;
pub mod sync;

pub use config::CoreConfig;
pub use db::repository::{DepartmentRepository, ProfileRepository, RepoError, RepoResult};
pub use guard::{AccessContext, AccessRequirement, PermissionState, Policy, allow};
pub use permissions::{PermissionResolver, effective_permissions};
pub use resolver::{AuthError, IdentityResolver};
pub use session::{SessionError, SessionService};
pub use sync::{ProfileSynchronizer, SyncFailure, SyncReport};

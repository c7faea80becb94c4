//! Access Guard
//!
//! The single decision function every protected surface consults. Pure:
//! no I/O, no side effects. An unresolved permission state always denies,
//! so a surface can never flash unauthorized content while permissions are
//! still loading.

use std::collections::HashSet;

use shared::models::Role;
use shared::permission::PermissionAction;

/// Permission set as seen by a surface: possibly still being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionState {
    /// Resolution in flight — deny everything.
    Loading,
    Ready(HashSet<PermissionAction>),
}

impl PermissionState {
    fn contains(&self, action: PermissionAction) -> bool {
        match self {
            PermissionState::Loading => false,
            PermissionState::Ready(set) => set.contains(&action),
        }
    }
}

/// How a list of required permissions combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    All,
    Any,
}

/// What a surface requires before it renders.
#[derive(Debug, Clone)]
pub enum AccessRequirement {
    /// Any of these roles is acceptable
    AnyRole(Vec<Role>),
    /// A single required permission
    Permission(PermissionAction),
    /// A list of permissions combined with a policy
    Permissions(Vec<PermissionAction>, Policy),
}

/// Everything the guard needs about the current session.
#[derive(Debug, Clone)]
pub struct AccessContext {
    /// Role of the signed-in profile; `None` when nobody is signed in.
    pub role: Option<Role>,
    pub permissions: PermissionState,
}

impl AccessContext {
    pub fn anonymous() -> Self {
        Self {
            role: None,
            permissions: PermissionState::Loading,
        }
    }

    pub fn new(role: Role, permissions: HashSet<PermissionAction>) -> Self {
        Self {
            role: Some(role),
            permissions: PermissionState::Ready(permissions),
        }
    }
}

/// Allow/deny decision for one surface.
///
/// Role requirements decide on the role alone and do not wait on
/// permission resolution: the role is part of the session from the moment
/// sign-in completes, while permissions resolve asynchronously.
pub fn allow(context: &AccessContext, requirement: &AccessRequirement) -> bool {
    match requirement {
        AccessRequirement::AnyRole(roles) => match context.role {
            Some(role) => roles.contains(&role),
            None => false,
        },
        AccessRequirement::Permission(action) => context.permissions.contains(*action),
        AccessRequirement::Permissions(actions, policy) => {
            if context.permissions == PermissionState::Loading {
                return false;
            }
            if actions.is_empty() {
                return true;
            }
            match policy {
                Policy::All => actions.iter().all(|a| context.permissions.contains(*a)),
                Policy::Any => actions.iter().any(|a| context.permissions.contains(*a)),
            }
        }
    }
}

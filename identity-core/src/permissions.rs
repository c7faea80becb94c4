//! Permission Resolver
//!
//! Computes the effective permission set for a resolved profile.
//! Permissions are department-scoped: access follows organizational
//! placement, not job title. The manager override is additive only, so a
//! department's configuration can never strip a manager of the defaults.

use std::collections::HashSet;

use shared::models::{Department, Profile, Role};
use shared::permission::{PermissionAction, manager_defaults};

use crate::db::repository::{DepartmentRepository, RepoResult};

/// Effective permissions for `profile`, given its department lookup
/// result. Rules in order, first match wins:
///
/// 1. administrator → the full fixed set
/// 2. staff with a department → the department's list; union the manager
///    defaults iff the department is managed by this profile
/// 3. staff without a department, missing department, any other role →
///    empty set
pub fn effective_permissions(
    profile: &Profile,
    department: Option<&Department>,
) -> HashSet<PermissionAction> {
    if profile.role == Role::Administrator {
        return PermissionAction::all();
    }
    if profile.role != Role::Staff {
        return HashSet::new();
    }
    let Some(department) = department else {
        return HashSet::new();
    };

    let mut permissions: HashSet<PermissionAction> =
        department.permissions.iter().copied().collect();
    if let Some(id) = profile.id.as_ref()
        && department.is_managed_by(id)
    {
        permissions.extend(manager_defaults());
    }
    permissions
}

/// Repo-backed resolver: looks up the profile's department reference and
/// applies [`effective_permissions`].
#[derive(Clone)]
pub struct PermissionResolver {
    departments: DepartmentRepository,
}

impl PermissionResolver {
    pub fn new(departments: DepartmentRepository) -> Self {
        Self { departments }
    }

    pub async fn resolve(&self, profile: &Profile) -> RepoResult<HashSet<PermissionAction>> {
        // Only staff permissions depend on the department document
        let department = match (&profile.role, &profile.department) {
            (Role::Staff, Some(reference)) => self.departments.find_by_id(reference).await?,
            _ => None,
        };
        Ok(effective_permissions(profile, department.as_ref()))
    }
}

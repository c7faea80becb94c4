//! Permission Definitions
//!
//! Closed permission vocabulary for the platform. Every protected surface
//! checks membership in a `HashSet<PermissionAction>`; order is irrelevant.
//!
//! Grant sources:
//! - Administrators hold the full set unconditionally.
//! - Staff inherit their department's configured list.
//! - Department managers additionally receive [`manager_defaults`]
//!   (additive only, a department cannot strip a manager of them).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single capability token.
///
/// Serialized in `snake_case` so department documents and API payloads
/// read as `"view_users"`, `"manage_courses"`, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    ViewDashboard,
    ViewUsers,
    ViewCourses,
    ManageCourses,
    ViewLessons,
    ViewDepartments,
    ViewStatistics,
    ViewReports,
    ViewSalary,
    ManageEnrollments,
}

impl PermissionAction {
    /// Every defined action. This is also the administrator grant.
    pub const ALL: &'static [PermissionAction] = &[
        PermissionAction::ViewDashboard,
        PermissionAction::ViewUsers,
        PermissionAction::ViewCourses,
        PermissionAction::ManageCourses,
        PermissionAction::ViewLessons,
        PermissionAction::ViewDepartments,
        PermissionAction::ViewStatistics,
        PermissionAction::ViewReports,
        PermissionAction::ViewSalary,
        PermissionAction::ManageEnrollments,
    ];

    /// Full permission set (administrator grant).
    pub fn all() -> HashSet<PermissionAction> {
        Self::ALL.iter().copied().collect()
    }
}

/// Default permissions granted to a department manager on top of the
/// department's configured list.
pub const MANAGER_DEFAULTS: &[PermissionAction] = &[
    PermissionAction::ViewDashboard,
    PermissionAction::ViewUsers,
    PermissionAction::ViewSalary,
];

/// Manager default set as a `HashSet`.
pub fn manager_defaults() -> HashSet<PermissionAction> {
    MANAGER_DEFAULTS.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant_once() {
        let set = PermissionAction::all();
        assert_eq!(set.len(), PermissionAction::ALL.len());
        assert!(set.contains(&PermissionAction::ViewSalary));
    }

    #[test]
    fn manager_defaults_are_subset_of_all() {
        let all = PermissionAction::all();
        assert!(manager_defaults().is_subset(&all));
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&PermissionAction::ViewUsers).unwrap();
        assert_eq!(json, "\"view_users\"");
        let back: PermissionAction = serde_json::from_str("\"manage_courses\"").unwrap();
        assert_eq!(back, PermissionAction::ManageCourses);
    }
}

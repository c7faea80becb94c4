//! Department Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::permission::PermissionAction;

/// Department ID type
pub type DepartmentId = RecordId;

/// Department document (the `departments` collection).
///
/// Permissions and the manager reference are administered outside this
/// core; the identity core only reads them.
///
/// # Invariants
/// - At most one manager per department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub id: Option<DepartmentId>,
    pub name: String,
    /// Manager profile reference, if one is appointed.
    #[serde(default)]
    pub manager: Option<RecordId>,
    /// Configured permission grants for members. Stored as a list;
    /// resolution treats it as a set.
    #[serde(default)]
    pub permissions: Vec<PermissionAction>,
}

impl Department {
    /// True when `profile_id` is this department's appointed manager.
    pub fn is_managed_by(&self, profile_id: &RecordId) -> bool {
        self.manager.as_ref() == Some(profile_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_check_compares_record_ids() {
        let manager = RecordId::from_table_key("users", "m1");
        let other = RecordId::from_table_key("users", "m2");
        let dept = Department {
            id: Some(RecordId::from_table_key("departments", "sales")),
            name: "Sales".into(),
            manager: Some(manager.clone()),
            permissions: vec![PermissionAction::ViewCourses],
        };
        assert!(dept.is_managed_by(&manager));
        assert!(!dept.is_managed_by(&other));
    }

    #[test]
    fn missing_fields_default_on_deserialize() {
        let dept: Department = serde_json::from_str(r#"{"name":"Ops"}"#).unwrap();
        assert!(dept.manager.is_none());
        assert!(dept.permissions.is_empty());
    }
}

//! Profile Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::department::DepartmentId;

/// Profile ID type
pub type ProfileId = RecordId;

/// Closed role vocabulary.
///
/// "Department manager" is intentionally not a role: it is derived from
/// `Department::manager` pointing at the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Teacher,
    Student,
    #[default]
    Staff,
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Role::Administrator => write!(f, "administrator"),
            Role::Teacher => write!(f, "teacher"),
            Role::Student => write!(f, "student"),
            Role::Staff => write!(f, "staff"),
        }
    }
}

/// Employment snapshot kept in sync with the HR system of record.
///
/// Every field except `is_active` is optional; the synchronizer only ever
/// replaces a field with a present external value, never clears one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Employment {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub photo_url: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub monthly_salary: Option<Decimal>,
    pub employment_status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub marital_status: Option<String>,
    pub branch: Option<String>,
    pub team: Option<String>,
    pub salary_percentage: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Employment {
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }
}

/// Profile document (the `users` collection).
///
/// # Invariants
/// - `email` is unique across profiles (lowercased natural key).
/// - `id` is immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<ProfileId>,
    pub email: String,
    /// Argon2 PHC string. Never serialized out to consumers; the store
    /// layer writes it explicitly.
    #[serde(default, skip_serializing)]
    pub secret_hash: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub department: Option<DepartmentId>,
    #[serde(default)]
    pub position: Option<String>,
    pub approved: bool,
    #[serde(default)]
    pub employment: Employment,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// True when this profile passes the approval gate.
    pub fn can_sign_in(&self) -> bool {
        self.approved || self.role == Role::Administrator
    }
}

/// Explicit registration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCreate {
    pub email: String,
    pub secret: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub department: Option<DepartmentId>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Self-service edit payload. Absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"administrator\""
        );
        let role: Role = serde_json::from_str("\"staff\"").unwrap();
        assert_eq!(role, Role::Staff);
    }

    #[test]
    fn secret_hash_is_never_serialized() {
        let profile = Profile {
            id: None,
            email: "a@b.c".into(),
            secret_hash: "$argon2id$v=19$...".into(),
            display_name: "A".into(),
            role: Role::Staff,
            department: None,
            position: None,
            approved: true,
            employment: Employment::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("secret_hash"));
    }

    #[test]
    fn approval_gate_waives_administrators() {
        let mut profile = Profile {
            id: None,
            email: "a@b.c".into(),
            secret_hash: String::new(),
            display_name: "A".into(),
            role: Role::Administrator,
            department: None,
            position: None,
            approved: false,
            employment: Employment::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(profile.can_sign_in());
        profile.role = Role::Teacher;
        assert!(!profile.can_sign_in());
    }
}

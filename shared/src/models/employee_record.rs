//! External HR Employee Record
//!
//! Read-only snapshot returned by the HR federation service. Field names
//! follow the HR wire format (camelCase); everything except the identifier
//! and email is optional.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee snapshot as served by the HR system of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEmployeeRecord {
    pub employee_id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub salary_percentage: Option<Decimal>,
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Password equivalent, when the HR system issues one. Authoritative
    /// for credentials once the account is linked.
    #[serde(default)]
    pub secret: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sparse_wire_record() {
        let record: ExternalEmployeeRecord = serde_json::from_str(
            r#"{"employeeId":"e-77","email":"kim@example.com","fullName":"Kim Doe","isActive":true}"#,
        )
        .unwrap();
        assert_eq!(record.employee_id.as_deref(), Some("e-77"));
        assert_eq!(record.full_name.as_deref(), Some("Kim Doe"));
        assert!(record.phone.is_none());
        assert_eq!(record.is_active, Some(true));
    }
}

//! HR federation client
//!
//! `Federation` is the seam the identity resolver depends on; `HrClient`
//! is the reqwest-backed implementation speaking the HR wire contract.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shared::models::ExternalEmployeeRecord;

use crate::{ClientConfig, ClientError, ClientResult};

/// Credential verification request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    employee_id_or_email: &'a str,
    secret: &'a str,
}

/// Successful verification envelope: `{success: true, employee: {...}}`.
#[derive(Debug, Deserialize)]
struct VerifyEnvelope {
    success: bool,
    employee: Option<ExternalEmployeeRecord>,
}

/// Error body served with 403 responses: `{error: "..."}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

/// Access to the external HR system of record.
#[async_trait]
pub trait Federation: Send + Sync {
    /// Verify `(identifier, secret)` against the HR service and return the
    /// matched employee record.
    async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> ClientResult<ExternalEmployeeRecord>;

    /// Fetch the full employee roster for batch synchronization.
    async fn fetch_roster(&self) -> ClientResult<Vec<ExternalEmployeeRecord>>;
}

/// Network HR client
#[derive(Debug, Clone)]
pub struct HrClient {
    client: Client,
    config: ClientConfig,
}

impl HrClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Map a non-2xx status and its body to the typed error taxonomy.
    fn error_for_status(status: StatusCode, body: &str) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => {
                let message = serde_json::from_str::<ApiErrorBody>(body)
                    .ok()
                    .and_then(|b| b.error)
                    .unwrap_or_else(|| "account disabled".to_string());
                ClientError::Forbidden(message)
            }
            StatusCode::NOT_FOUND => ClientError::NotFound("no matching employee".to_string()),
            status if status.is_server_error() => ClientError::Server(status.to_string()),
            status => ClientError::InvalidResponse(format!("unexpected status {status}")),
        }
    }
}

#[async_trait]
impl Federation for HrClient {
    async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> ClientResult<ExternalEmployeeRecord> {
        let response = self
            .client
            .post(self.url(&self.config.verify_path))
            .json(&VerifyRequest {
                employee_id_or_email: identifier,
                secret,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_for_status(status, &body));
        }

        let envelope: VerifyEnvelope = response.json().await?;
        if !envelope.success {
            return Err(ClientError::Unauthorized);
        }
        envelope
            .employee
            .ok_or_else(|| ClientError::InvalidResponse("success without employee".to_string()))
    }

    async fn fetch_roster(&self) -> ClientResult<Vec<ExternalEmployeeRecord>> {
        let response = self
            .client
            .get(self.url(&self.config.roster_path))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_for_status(status, &body));
        }

        let roster: Vec<ExternalEmployeeRecord> = response.json().await?;
        tracing::debug!(count = roster.len(), "fetched HR roster");
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_carries_service_message() {
        let err = HrClient::error_for_status(
            StatusCode::FORBIDDEN,
            r#"{"error":"account suspended by HR"}"#,
        );
        match err {
            ClientError::Forbidden(message) => assert_eq!(message, "account suspended by HR"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn forbidden_without_body_gets_default_message() {
        let err = HrClient::error_for_status(StatusCode::FORBIDDEN, "not json");
        assert!(matches!(err, ClientError::Forbidden(m) if m == "account disabled"));
    }

    #[test]
    fn status_mapping_covers_contract() {
        assert!(matches!(
            HrClient::error_for_status(StatusCode::UNAUTHORIZED, ""),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            HrClient::error_for_status(StatusCode::NOT_FOUND, ""),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            HrClient::error_for_status(StatusCode::BAD_GATEWAY, ""),
            ClientError::Server(_)
        ));
        assert!(matches!(
            HrClient::error_for_status(StatusCode::IM_A_TEAPOT, ""),
            ClientError::InvalidResponse(_)
        ));
    }

    #[test]
    fn verify_envelope_parses_contract_shape() {
        let envelope: VerifyEnvelope = serde_json::from_str(
            r#"{"success":true,"employee":{"employeeId":"e-1","email":"a@b.c"}}"#,
        )
        .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.employee.unwrap().email, "a@b.c");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = HrClient::new(ClientConfig::new("https://hr.example.com/")).unwrap();
        assert_eq!(
            client.url("/api/employees"),
            "https://hr.example.com/api/employees"
        );
    }
}

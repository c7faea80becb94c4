//! Client error types

use thiserror::Error;

/// HR federation client error.
///
/// The variants mirror the HR endpoint contract: only `Forbidden` is fatal
/// for a login attempt; every other failure leaves the resolver free to
/// fall back to local-only credential checks.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 401 — credentials rejected by the HR service
    #[error("Unauthorized")]
    Unauthorized,

    /// 403 — account disabled at the HR source
    #[error("Account disabled: {0}")]
    Forbidden(String),

    /// 404 — no employee with that identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// 5xx — HR service failure
    #[error("Server error: {0}")]
    Server(String),

    /// Response body did not match the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the identity resolver may continue with local-only
    /// resolution after this failure.
    ///
    /// `Forbidden` means the account is disabled at the source and must
    /// abort the login outright; everything else degrades to "no external
    /// record available".
    pub fn allows_local_fallback(&self) -> bool {
        !matches!(self, ClientError::Forbidden(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_forbidden_is_fatal() {
        assert!(!ClientError::Forbidden("disabled".into()).allows_local_fallback());
        assert!(ClientError::Unauthorized.allows_local_fallback());
        assert!(ClientError::NotFound("x".into()).allows_local_fallback());
        assert!(ClientError::Server("boom".into()).allows_local_fallback());
        assert!(ClientError::InvalidResponse("bad".into()).allows_local_fallback());
    }
}

//! Client configuration

/// Configuration for connecting to the HR federation service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "https://hr.example.com")
    pub base_url: String,

    /// Request timeout in seconds.
    ///
    /// The timeout is mandatory: an unresponsive HR service must degrade
    /// into the local-only fallback, not block logins.
    pub timeout: u64,

    /// Credential verification path (POST)
    pub verify_path: String,

    /// Roster bulk path (GET)
    pub roster_path: String,
}

impl ClientConfig {
    /// Create a configuration with default paths and a 10s timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 10,
            verify_path: "/api/employees/verify".to_string(),
            roster_path: "/api/employees".to_string(),
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the credential verification path
    pub fn with_verify_path(mut self, path: impl Into<String>) -> Self {
        self.verify_path = path.into();
        self
    }

    /// Set the roster bulk path
    pub fn with_roster_path(mut self, path: impl Into<String>) -> Self {
        self.roster_path = path.into();
        self
    }
}

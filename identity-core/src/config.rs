//! Core configuration, read from environment variables

use std::path::PathBuf;

/// Identity core configuration.
pub struct CoreConfig {
    /// Profile store directory (embedded database)
    pub data_dir: PathBuf,
    /// Session database file
    pub session_path: PathBuf,
    /// HR federation service base URL
    pub hr_base_url: String,
    /// HR request timeout in seconds
    pub hr_timeout: u64,
    /// Worker pool width for bulk roster sync
    pub sync_concurrency: usize,
}

impl CoreConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            data_dir: std::env::var("IDENTITY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("identity_data")),
            session_path: std::env::var("IDENTITY_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("identity_data/session.redb")),
            hr_base_url: std::env::var("HR_BASE_URL").expect("HR_BASE_URL must be set"),
            hr_timeout: std::env::var("HR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            sync_concurrency: std::env::var("SYNC_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
        }
    }
}

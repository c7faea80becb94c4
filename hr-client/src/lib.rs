//! HR Client - HTTP client for the HR federation service
//!
//! Provides typed access to the external HR system of record: credential
//! verification (per-login) and roster bulk fetch (batch sync). Outcomes
//! are typed so the identity resolver can distinguish fatal failures from
//! ones that allow a local-only fallback.

pub mod client;
pub mod config;
pub mod error;

pub use client::{Federation, HrClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};

// Re-export shared wire types for convenience
pub use shared::models::ExternalEmployeeRecord;

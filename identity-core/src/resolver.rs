//! Identity Resolver
//!
//! Orchestrates login: federation first, local fallback second. The HR
//! service is authoritative when it answers; when it cannot (bad secret,
//! unknown identifier, outage, timeout) resolution degrades to the local
//! profile store. Only a disabled account at the HR source aborts the
//! attempt outright.

use std::sync::Arc;

use hr_client::{ClientError, Federation};
use shared::models::{ExternalEmployeeRecord, Profile};
use thiserror::Error;

use crate::db::repository::{ProfileRepository, RepoError};
use crate::session::{SessionError, SessionService};
use crate::sync::ProfileSynchronizer;

/// Typed authentication failures. Messages are user-facing.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No matching identity anywhere, or wrong secret
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Disabled at the HR source; requires administrator intervention
    #[error("Account disabled: {0}")]
    AccountDisabled(String),

    /// Valid credentials, access deferred until approved
    #[error("Account is awaiting approval")]
    PendingApproval,

    /// Profile store failure
    #[error("Profile store error: {0}")]
    Store(#[from] RepoError),

    /// Session persistence failure
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Login orchestrator.
pub struct IdentityResolver<F: Federation> {
    federation: F,
    profiles: ProfileRepository,
    synchronizer: ProfileSynchronizer,
    session: Arc<SessionService>,
}

impl<F: Federation> IdentityResolver<F> {
    pub fn new(federation: F, profiles: ProfileRepository, session: Arc<SessionService>) -> Self {
        let synchronizer = ProfileSynchronizer::new(profiles.clone());
        Self {
            federation,
            profiles,
            synchronizer,
            session,
        }
    }

    /// Resolve `(identifier, secret)` into an authenticated profile.
    ///
    /// Sequence:
    /// 1. Ask the HR federation service. A `403` aborts immediately with
    ///    [`AuthError::AccountDisabled`] — no local fallback. Any other
    ///    failure means "no external record" and resolution continues.
    /// 2. Look up the local profile by email.
    /// 3. Neither source knows the identity → [`AuthError::InvalidCredentials`].
    /// 4. External record but no local profile → auto-provision (first
    ///    federated login).
    /// 5. Local profile without an external record → the stored secret
    ///    must verify. With an external record the HR service already
    ///    vouched for the credentials.
    /// 6. Approval gate (administrators are exempt).
    /// 7. With an external record, synchronize employment fields before
    ///    returning.
    /// 8. Install the resolved profile as the current session.
    ///
    /// No retries; callers may retry the whole call.
    pub async fn resolve(&self, identifier: &str, secret: &str) -> Result<Profile, AuthError> {
        let external = self.try_federation(identifier, secret).await?;

        let local = self.profiles.find_by_email(identifier).await?;

        let profile = match (local, external) {
            (None, None) => return Err(AuthError::InvalidCredentials),
            (None, Some(record)) => {
                // First federated contact: auto-provision, once
                self.profiles.provision(&record, Some(secret)).await?
            }
            (Some(profile), external) => {
                if external.is_none() && !ProfileRepository::verify_secret(&profile, secret) {
                    return Err(AuthError::InvalidCredentials);
                }
                if !profile.can_sign_in() {
                    return Err(AuthError::PendingApproval);
                }
                match external {
                    Some(record) => self.synchronizer.sync_one(profile, &record).await?,
                    None => profile,
                }
            }
        };

        self.session.set(&profile)?;
        tracing::info!(email = %profile.email, role = %profile.role, "login resolved");
        Ok(profile)
    }

    /// Step 1: call the HR service, mapping its outcome to "record",
    /// "no record" or a fatal disabled-account failure.
    async fn try_federation(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Option<ExternalEmployeeRecord>, AuthError> {
        match self.federation.verify_credentials(identifier, secret).await {
            Ok(record) => Ok(Some(record)),
            Err(ClientError::Forbidden(message)) => Err(AuthError::AccountDisabled(message)),
            Err(e) => {
                debug_assert!(e.allows_local_fallback());
                tracing::warn!(
                    identifier,
                    error = %e,
                    "HR federation unavailable, continuing with local resolution"
                );
                Ok(None)
            }
        }
    }
}

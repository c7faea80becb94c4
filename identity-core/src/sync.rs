//! Profile Synchronizer
//!
//! Merges external HR employee records into local profiles. The merge is
//! table-driven: one [`MergeRule`] per synchronized field, so adding a
//! field is a single table entry. A present external value replaces the
//! stored one; an absent external value leaves the stored value alone —
//! a populated field is never cleared.
//!
//! Bulk mode runs the whole roster through a bounded-concurrency worker
//! pool and collects per-record failures instead of aborting the batch.

use chrono::Utc;
use futures::StreamExt;
use hr_client::{ClientError, Federation};
use shared::models::{ExternalEmployeeRecord, Profile};

use crate::db::repository::{ProfileRepository, RepoResult};

/// One synchronized field: copies the external value into the profile when
/// present, reporting whether anything changed.
struct MergeRule {
    field: &'static str,
    apply: fn(&ExternalEmployeeRecord, &mut Profile) -> bool,
}

fn copy_opt<T: Clone + PartialEq>(src: &Option<T>, dst: &mut Option<T>) -> bool {
    match src {
        Some(value) if dst.as_ref() != Some(value) => {
            *dst = Some(value.clone());
            true
        }
        _ => false,
    }
}

const EMPLOYMENT_RULES: &[MergeRule] = &[
    MergeRule { field: "phone", apply: |r, p| copy_opt(&r.phone, &mut p.employment.phone) },
    MergeRule { field: "address", apply: |r, p| copy_opt(&r.address, &mut p.employment.address) },
    MergeRule { field: "country", apply: |r, p| copy_opt(&r.country, &mut p.employment.country) },
    MergeRule { field: "photo_url", apply: |r, p| copy_opt(&r.avatar_url, &mut p.employment.photo_url) },
    MergeRule { field: "birth_date", apply: |r, p| copy_opt(&r.birthday, &mut p.employment.birth_date) },
    MergeRule { field: "monthly_salary", apply: |r, p| copy_opt(&r.base_salary, &mut p.employment.monthly_salary) },
    MergeRule { field: "employment_status", apply: |r, p| copy_opt(&r.employment_status, &mut p.employment.employment_status) },
    MergeRule { field: "start_date", apply: |r, p| copy_opt(&r.start_date, &mut p.employment.start_date) },
    MergeRule { field: "marital_status", apply: |r, p| copy_opt(&r.marital_status, &mut p.employment.marital_status) },
    MergeRule { field: "branch", apply: |r, p| copy_opt(&r.branch, &mut p.employment.branch) },
    MergeRule { field: "team", apply: |r, p| copy_opt(&r.team, &mut p.employment.team) },
    MergeRule { field: "salary_percentage", apply: |r, p| copy_opt(&r.salary_percentage, &mut p.employment.salary_percentage) },
    MergeRule {
        field: "is_active",
        apply: |r, p| match r.is_active {
            Some(active) if p.employment.is_active != active => {
                p.employment.is_active = active;
                true
            }
            _ => false,
        },
    },
];

/// Apply the employment merge table. Returns true when any field changed.
pub fn apply_employment(profile: &mut Profile, record: &ExternalEmployeeRecord) -> bool {
    let mut changed = false;
    for rule in EMPLOYMENT_RULES {
        if (rule.apply)(record, profile) {
            tracing::trace!(field = rule.field, email = %profile.email, "merged HR field");
            changed = true;
        }
    }
    changed
}

/// Outcome of one roster record.
#[derive(Debug)]
enum RecordOutcome {
    Created,
    Updated,
    Unchanged,
    Failed(SyncFailure),
}

/// A per-record failure collected during bulk sync.
#[derive(Debug)]
pub struct SyncFailure {
    pub email: String,
    pub error: String,
}

/// Result of a bulk roster sync.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failures: Vec<SyncFailure>,
}

/// Merges HR records into the profile store.
#[derive(Clone)]
pub struct ProfileSynchronizer {
    profiles: ProfileRepository,
    /// Worker pool width for bulk roster sync
    concurrency: usize,
}

impl ProfileSynchronizer {
    pub fn new(profiles: ProfileRepository) -> Self {
        Self {
            profiles,
            concurrency: 4,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Merge an external record into a profile in memory.
    ///
    /// HR is authoritative for credentials once linked: a present external
    /// secret overwrites the stored hash (skipped when the stored hash
    /// already verifies it, which keeps the merge idempotent). The update
    /// timestamp is refreshed on every run.
    pub fn merge(profile: &mut Profile, record: &ExternalEmployeeRecord) -> RepoResult<bool> {
        let mut changed = apply_employment(profile, record);

        if let Some(secret) = record.secret.as_deref()
            && !ProfileRepository::verify_secret(profile, secret)
        {
            profile.secret_hash = ProfileRepository::hash_secret(secret)?;
            changed = true;
        }

        profile.updated_at = Utc::now();
        Ok(changed)
    }

    /// Merge and persist a single profile.
    pub async fn sync_one(
        &self,
        mut profile: Profile,
        record: &ExternalEmployeeRecord,
    ) -> RepoResult<Profile> {
        Self::merge(&mut profile, record)?;
        self.profiles.persist(&profile).await
    }

    /// Fetch the roster from the HR service and synchronize it.
    ///
    /// Failing to fetch the roster is the only fatal error here; once the
    /// roster is in hand, failures stay per-record.
    pub async fn sync_from<F: Federation>(&self, federation: &F) -> Result<SyncReport, ClientError> {
        let roster = federation.fetch_roster().await?;
        Ok(self.sync_roster(roster).await)
    }

    /// Synchronize a full roster.
    ///
    /// Records are processed by a bounded worker pool; one record's
    /// failure never aborts the rest. Unknown employees are provisioned
    /// the same way first federated login does.
    pub async fn sync_roster(&self, roster: Vec<ExternalEmployeeRecord>) -> SyncReport {
        let outcomes: Vec<RecordOutcome> = futures::stream::iter(roster)
            .map(|record| {
                let sync = self.clone();
                async move {
                    let email = record.email.clone();
                    match sync.sync_record(&record).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            tracing::warn!(email = %email, error = %e, "roster record failed");
                            RecordOutcome::Failed(SyncFailure {
                                email,
                                error: e.to_string(),
                            })
                        }
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = SyncReport::default();
        for outcome in outcomes {
            match outcome {
                RecordOutcome::Created => report.created += 1,
                RecordOutcome::Updated => report.updated += 1,
                RecordOutcome::Unchanged => report.unchanged += 1,
                RecordOutcome::Failed(failure) => report.failures.push(failure),
            }
        }
        tracing::info!(
            created = report.created,
            updated = report.updated,
            unchanged = report.unchanged,
            failed = report.failures.len(),
            "roster sync finished"
        );
        report
    }

    async fn sync_record(&self, record: &ExternalEmployeeRecord) -> RepoResult<RecordOutcome> {
        match self.profiles.find_by_email(&record.email).await? {
            Some(mut profile) => {
                let changed = Self::merge(&mut profile, record)?;
                self.profiles.persist(&profile).await?;
                Ok(if changed {
                    RecordOutcome::Updated
                } else {
                    RecordOutcome::Unchanged
                })
            }
            None => {
                self.profiles.provision(record, None).await?;
                Ok(RecordOutcome::Created)
            }
        }
    }
}

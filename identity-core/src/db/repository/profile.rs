//! Profile Repository
//!
//! Owns the `users` collection and the credential-hashing boundary:
//! plaintext secrets never leave this module once hashed.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use shared::models::{Employment, ExternalEmployeeRecord, Profile, ProfileCreate, ProfileUpdate, Role};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{RepoError, RepoResult};

#[derive(Clone)]
pub struct ProfileRepository {
    db: Surreal<Db>,
}

impl ProfileRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Hash a secret with argon2 (PHC string output).
    pub fn hash_secret(secret: &str) -> RepoResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| RepoError::Database(format!("Failed to hash secret: {e}")))
    }

    /// Verify a submitted secret against a stored PHC string.
    pub fn verify_secret(profile: &Profile, secret: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&profile.secret_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Find profile by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Profile>> {
        let profile: Option<Profile> = self.db.select(id.clone()).await?;
        Ok(profile)
    }

    /// Find profile by email (the natural key)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Profile>> {
        let email = Self::normalize_email(email);
        let mut result = self
            .db
            .query("SELECT * FROM users WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let profiles: Vec<Profile> = result.take(0)?;
        Ok(profiles.into_iter().next())
    }

    /// Explicit registration.
    ///
    /// Non-administrator registrations start unapproved and wait for an
    /// administrator to clear them.
    pub async fn register(&self, data: ProfileCreate) -> RepoResult<Profile> {
        let email = Self::normalize_email(&data.email);
        if email.is_empty() || !email.contains('@') {
            return Err(RepoError::Validation("invalid email format".to_string()));
        }
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{email}' already registered"
            )));
        }

        let secret_hash = Self::hash_secret(&data.secret)?;
        let now = Utc::now();
        let profile = Profile {
            id: None,
            email,
            secret_hash,
            display_name: data.display_name,
            role: data.role,
            department: data.department,
            position: data.position,
            approved: data.role == Role::Administrator,
            employment: Employment::new(),
            created_at: now,
            updated_at: now,
        };

        // email is the unique natural key, reuse it as the record key
        let id = RecordId::from_table_key("users", profile.email.clone());
        self.write(&id, &profile).await
    }

    /// Auto-provision a profile from a federated employee record.
    ///
    /// Triggered once, at first federated contact: role is fixed to staff
    /// and the account is approved immediately. The id is derived from the
    /// external identifier when present, else from the current timestamp.
    pub async fn provision(
        &self,
        record: &ExternalEmployeeRecord,
        fallback_secret: Option<&str>,
    ) -> RepoResult<Profile> {
        let email = Self::normalize_email(&record.email);
        if email.is_empty() || !email.contains('@') {
            return Err(RepoError::Validation(format!(
                "HR record has no usable email: '{email}'"
            )));
        }
        // Without any secret the account stays federated-only: an empty
        // hash never verifies locally
        let secret_hash = match record.secret.as_deref().or(fallback_secret) {
            Some(secret) => Self::hash_secret(secret)?,
            None => String::new(),
        };
        let now = Utc::now();
        let mut profile = Profile {
            id: None,
            email,
            secret_hash,
            display_name: record.full_name.clone().unwrap_or_default(),
            role: Role::Staff,
            department: None,
            position: None,
            approved: true,
            employment: Employment::new(),
            created_at: now,
            updated_at: now,
        };
        crate::sync::apply_employment(&mut profile, record);

        let key = record
            .employee_id
            .clone()
            .unwrap_or_else(|| now_millis().to_string());
        let id = RecordId::from_table_key("users", key);
        let created = self.write(&id, &profile).await?;
        tracing::info!(email = %created.email, "provisioned profile from HR record");
        Ok(created)
    }

    /// Self-service edit. Absent fields are left untouched; a field is
    /// never cleared to empty.
    pub async fn update_profile(&self, id: &RecordId, data: ProfileUpdate) -> RepoResult<Profile> {
        let mut profile = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Profile {id} not found")))?;

        if let Some(display_name) = data.display_name {
            profile.display_name = display_name;
        }
        if let Some(position) = data.position {
            profile.position = Some(position);
        }
        if let Some(phone) = data.phone {
            profile.employment.phone = Some(phone);
        }
        if let Some(address) = data.address {
            profile.employment.address = Some(address);
        }
        if let Some(country) = data.country {
            profile.employment.country = Some(country);
        }
        if let Some(photo_url) = data.photo_url {
            profile.employment.photo_url = Some(photo_url);
        }
        profile.updated_at = Utc::now();

        // find_by_id guarantees the hash is loaded, write it back as-is
        self.write(id, &profile).await
    }

    /// Write a profile back under its id (document-level upsert).
    pub async fn persist(&self, profile: &Profile) -> RepoResult<Profile> {
        let id = profile
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("profile has no id".to_string()))?;
        self.write(&id, profile).await
    }

    async fn write(&self, id: &RecordId, profile: &Profile) -> RepoResult<Profile> {
        let mut result = self
            .db
            .query(
                r#"UPSERT $id SET
                    email = $email,
                    secret_hash = $secret_hash,
                    display_name = $display_name,
                    role = $role,
                    department = $department,
                    position = $position,
                    approved = $approved,
                    employment = $employment,
                    created_at = $created_at,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("id", id.clone()))
            .bind(("email", profile.email.clone()))
            .bind(("secret_hash", profile.secret_hash.clone()))
            .bind(("display_name", profile.display_name.clone()))
            .bind(("role", profile.role))
            .bind(("department", profile.department.clone()))
            .bind(("position", profile.position.clone()))
            .bind(("approved", profile.approved))
            .bind(("employment", profile.employment.clone()))
            .bind(("created_at", profile.created_at))
            .bind(("updated_at", profile.updated_at))
            .await?;

        let mut stored: Option<Profile> = result.take(0)?;
        // secret_hash is skip_serializing, so RETURN AFTER cannot echo it
        // through serde; splice the known value back in
        if let Some(stored) = stored.as_mut() {
            stored.secret_hash = profile.secret_hash.clone();
        }
        stored.ok_or_else(|| RepoError::Database("Failed to write profile".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_memory;
    use shared::models::ProfileCreate;

    fn create(email: &str, role: Role) -> ProfileCreate {
        ProfileCreate {
            email: email.to_string(),
            secret: "hunter2".to_string(),
            display_name: "Test".to_string(),
            role,
            department: None,
            position: None,
        }
    }

    #[tokio::test]
    async fn register_hashes_and_round_trips() {
        let db = connect_memory().await.unwrap();
        let repo = ProfileRepository::new(db);

        let profile = repo.register(create("Kim@Example.com", Role::Staff)).await.unwrap();
        assert_eq!(profile.email, "kim@example.com");
        assert!(!profile.approved);
        assert!(profile.secret_hash.starts_with("$argon2"));

        let found = repo.find_by_email("kim@example.com").await.unwrap().unwrap();
        assert!(ProfileRepository::verify_secret(&found, "hunter2"));
        assert!(!ProfileRepository::verify_secret(&found, "wrong"));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let db = connect_memory().await.unwrap();
        let repo = ProfileRepository::new(db);

        repo.register(create("dup@example.com", Role::Staff)).await.unwrap();
        let err = repo.register(create("dup@example.com", Role::Staff)).await;
        assert!(matches!(err, Err(RepoError::Duplicate(_))));
    }

    #[tokio::test]
    async fn administrator_registration_is_preapproved() {
        let db = connect_memory().await.unwrap();
        let repo = ProfileRepository::new(db);

        let admin = repo
            .register(create("root@example.com", Role::Administrator))
            .await
            .unwrap();
        assert!(admin.approved);
    }

    #[tokio::test]
    async fn update_profile_never_clears_fields() {
        let db = connect_memory().await.unwrap();
        let repo = ProfileRepository::new(db);

        let profile = repo.register(create("edit@example.com", Role::Staff)).await.unwrap();
        let id = profile.id.clone().unwrap();

        repo.update_profile(
            &id,
            ProfileUpdate {
                phone: Some("123".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // a second edit that omits phone must not erase it
        let updated = repo
            .update_profile(
                &id,
                ProfileUpdate {
                    display_name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.display_name, "Renamed");
        assert_eq!(updated.employment.phone.as_deref(), Some("123"));
        // credentials survive edits
        assert!(ProfileRepository::verify_secret(&updated, "hunter2"));
    }
}

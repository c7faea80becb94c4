//! Session Service
//!
//! Holds the currently authenticated profile for the client lifetime and
//! persists it across restarts: a redb database with a single well-known
//! key, mirrored by an in-memory slot. This is the only state in the core
//! that survives a process restart.
//!
//! The service is injected into callers (never ambient), so tests can run
//! against an in-memory backend.

use std::path::Path;

use parking_lot::RwLock;
use redb::{Database, ReadableDatabase, TableDefinition};
use shared::models::Profile;
use thiserror::Error;

/// Table holding the serialized session: key = well-known entry name,
/// value = JSON-serialized Profile
const SESSION_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

const CURRENT_PROFILE_KEY: &str = "current_profile";

/// Session storage errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Session transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Session table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Session storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Session commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Current-session holder with explicit load/set/clear lifecycle.
pub struct SessionService {
    db: Database,
    current: RwLock<Option<Profile>>,
}

impl SessionService {
    /// Open (or create) the session database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let db = Database::create(path)?;
        Self::with_database(db)
    }

    /// In-memory session store (tests).
    pub fn open_memory() -> Result<Self, SessionError> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::with_database(db)
    }

    fn with_database(db: Database) -> Result<Self, SessionError> {
        // Create the table up front so reads never race table creation
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SESSION_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self {
            db,
            current: RwLock::new(None),
        })
    }

    /// Read persisted session state into the in-memory slot. Called once
    /// at startup; returns the restored profile, if any.
    pub fn load(&self) -> Result<Option<Profile>, SessionError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SESSION_TABLE)?;
        let profile = match table.get(CURRENT_PROFILE_KEY)? {
            Some(bytes) => Some(serde_json::from_slice::<Profile>(bytes.value())?),
            None => None,
        };
        *self.current.write() = profile.clone();
        Ok(profile)
    }

    /// Currently authenticated profile, if any.
    pub fn current(&self) -> Option<Profile> {
        self.current.read().clone()
    }

    /// Install a resolved profile as the current session and persist it.
    pub fn set(&self, profile: &Profile) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec(profile)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.insert(CURRENT_PROFILE_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        *self.current.write() = Some(profile.clone());
        Ok(())
    }

    /// Sign out: clear both the persisted entry and the in-memory slot.
    pub fn clear(&self) -> Result<(), SessionError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.remove(CURRENT_PROFILE_KEY)?;
        }
        write_txn.commit()?;
        *self.current.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{Employment, Role};

    fn profile(email: &str) -> Profile {
        Profile {
            id: Some(surrealdb::RecordId::from_table_key("users", "s1")),
            email: email.to_string(),
            secret_hash: String::new(),
            display_name: "Session".to_string(),
            role: Role::Staff,
            department: None,
            position: None,
            approved: true,
            employment: Employment::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn set_load_clear_roundtrip() {
        let session = SessionService::open_memory().unwrap();
        assert!(session.load().unwrap().is_none());

        session.set(&profile("s@example.com")).unwrap();
        assert_eq!(session.current().unwrap().email, "s@example.com");

        let restored = session.load().unwrap().unwrap();
        assert_eq!(restored.email, "s@example.com");
        assert_eq!(restored.role, Role::Staff);

        session.clear().unwrap();
        assert!(session.current().is_none());
        assert!(session.load().unwrap().is_none());
    }

    #[test]
    fn survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.redb");

        {
            let session = SessionService::open(&path).unwrap();
            session.set(&profile("persist@example.com")).unwrap();
        }

        let session = SessionService::open(&path).unwrap();
        let restored = session.load().unwrap().unwrap();
        assert_eq!(restored.email, "persist@example.com");
    }
}

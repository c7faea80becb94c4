//! Database Module
//!
//! Embedded SurrealDB handle for the profile store. Two collections are
//! used: `users` (queryable by email) and `departments` (queryable by id
//! or manager). Writes are document-level upserts; no multi-document
//! transactions.

pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use repository::{RepoError, RepoResult};

/// Namespace/database used for the identity collections.
const NAMESPACE: &str = "campus";
const DATABASE: &str = "identity";

/// Open the on-disk profile store.
pub async fn connect(path: &str) -> RepoResult<Surreal<Db>> {
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| RepoError::Database(format!("Failed to open store: {e}")))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| RepoError::Database(format!("Failed to select namespace: {e}")))?;
    tracing::info!(path, "profile store opened");
    Ok(db)
}

/// Open an in-memory store (tests).
pub async fn connect_memory() -> RepoResult<Surreal<Db>> {
    use surrealdb::engine::local::Mem;

    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| RepoError::Database(format!("Failed to open store: {e}")))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| RepoError::Database(format!("Failed to select namespace: {e}")))?;
    Ok(db)
}

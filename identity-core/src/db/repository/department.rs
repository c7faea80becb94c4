//! Department Repository
//!
//! Read-side access to the `departments` collection. Permission lists and
//! manager references are administered elsewhere; this core only reads
//! them. The upsert exists for seeding and tests.

use shared::models::Department;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{RepoError, RepoResult};

#[derive(Clone)]
pub struct DepartmentRepository {
    db: Surreal<Db>,
}

impl DepartmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Find all departments
    pub async fn find_all(&self) -> RepoResult<Vec<Department>> {
        let departments: Vec<Department> = self
            .db
            .query("SELECT * FROM departments ORDER BY name")
            .await?
            .take(0)?;
        Ok(departments)
    }

    /// Find department by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Department>> {
        let department: Option<Department> = self.db.select(id.clone()).await?;
        Ok(department)
    }

    /// Find the department managed by a profile, if any
    pub async fn find_by_manager(&self, manager: &RecordId) -> RepoResult<Option<Department>> {
        let mut result = self
            .db
            .query("SELECT * FROM departments WHERE manager = $manager LIMIT 1")
            .bind(("manager", manager.clone()))
            .await?;
        let departments: Vec<Department> = result.take(0)?;
        Ok(departments.into_iter().next())
    }

    /// Upsert a department document (seeding/tests)
    pub async fn upsert(&self, id: &RecordId, department: &Department) -> RepoResult<Department> {
        let mut result = self
            .db
            .query(
                r#"UPSERT $id SET
                    name = $name,
                    manager = $manager,
                    permissions = $permissions
                RETURN AFTER"#,
            )
            .bind(("id", id.clone()))
            .bind(("name", department.name.clone()))
            .bind(("manager", department.manager.clone()))
            .bind(("permissions", department.permissions.clone()))
            .await?;
        let stored: Option<Department> = result.take(0)?;
        stored.ok_or_else(|| RepoError::Database("Failed to write department".to_string()))
    }
}

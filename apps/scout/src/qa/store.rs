//! Jobs database access for the QA batch.
//!
//! Activity only ever moves from active to inactive: there is no
//! operation that sets `is_active` back to true.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::models::jobs::{CompanyRow, JobRow, LocationRow, RoleRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Job {0} does not exist")]
    JobNotFound(i64),
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<CompanyRow>, StoreError>;
    async fn active_jobs(&self, company_id: i64) -> Result<Vec<JobRow>, StoreError>;
    async fn list_roles(&self) -> Result<Vec<RoleRow>, StoreError>;
    async fn list_locations(&self) -> Result<Vec<LocationRow>, StoreError>;
    /// Returns the first location named `city`, inserting one with empty
    /// state and country when none exists.
    async fn get_or_create_location(&self, city: &str) -> Result<LocationRow, StoreError>;
    async fn deactivate_job(&self, job_id: i64) -> Result<(), StoreError>;
    async fn set_job_location(&self, job_id: i64, location_id: i64) -> Result<(), StoreError>;
    async fn set_job_role(&self, job_id: i64, role_id: i64) -> Result<(), StoreError>;
}

/// `JobStore` over the job tracker's PostgreSQL tables.
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn update_job(&self, job_id: i64, query: &str, value: Option<i64>) -> Result<(), StoreError> {
        let mut q = sqlx::query(query).bind(job_id);
        if let Some(v) = value {
            q = q.bind(v);
        }
        let result = q.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::JobNotFound(job_id));
        }
        Ok(())
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list_companies(&self) -> Result<Vec<CompanyRow>, StoreError> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            "SELECT id::BIGINT AS id, name FROM jobtracker_company ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn active_jobs(&self, company_id: i64) -> Result<Vec<JobRow>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT j.id::BIGINT AS id,
                   j.company_id::BIGINT AS company_id,
                   j.title,
                   j.external_posting_url,
                   j.is_active,
                   j.role_id::BIGINT AS role_id,
                   r.title AS role_title,
                   j.job_location_id::BIGINT AS job_location_id
            FROM jobtracker_job j
            LEFT JOIN jobtracker_role r ON r.id = j.role_id
            WHERE j.company_id = $1 AND j.is_active
            ORDER BY j.id
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_roles(&self) -> Result<Vec<RoleRow>, StoreError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id::BIGINT AS id, title FROM jobtracker_role ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_locations(&self) -> Result<Vec<LocationRow>, StoreError> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT id::BIGINT AS id, city, state, country FROM jobtracker_location ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_or_create_location(&self, city: &str) -> Result<LocationRow, StoreError> {
        let existing = sqlx::query_as::<_, LocationRow>(
            "SELECT id::BIGINT AS id, city, state, country FROM jobtracker_location \
             WHERE city = $1 ORDER BY id LIMIT 1",
        )
        .bind(city)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(location) = existing {
            return Ok(location);
        }

        let created = sqlx::query_as::<_, LocationRow>(
            "INSERT INTO jobtracker_location (city, state, country) VALUES ($1, '', '') \
             RETURNING id::BIGINT AS id, city, state, country",
        )
        .bind(city)
        .fetch_one(&self.pool)
        .await?;

        info!("Created location row {} for {city:?}", created.id);
        Ok(created)
    }

    async fn deactivate_job(&self, job_id: i64) -> Result<(), StoreError> {
        self.update_job(
            job_id,
            "UPDATE jobtracker_job SET is_active = FALSE WHERE id = $1",
            None,
        )
        .await
    }

    async fn set_job_location(&self, job_id: i64, location_id: i64) -> Result<(), StoreError> {
        self.update_job(
            job_id,
            "UPDATE jobtracker_job SET job_location_id = $2 WHERE id = $1",
            Some(location_id),
        )
        .await
    }

    async fn set_job_role(&self, job_id: i64, role_id: i64) -> Result<(), StoreError> {
        self.update_job(
            job_id,
            "UPDATE jobtracker_job SET role_id = $2 WHERE id = $1",
            Some(role_id),
        )
        .await
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Rows of the job tracker's tables. The schema is owned by the job tracker;
// Scout reads these and updates a job's activity, role and location.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// An active job together with its current role title (joined in).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub external_posting_url: Option<String>,
    pub is_active: bool,
    pub role_id: Option<i64>,
    pub role_title: Option<String>,
    pub job_location_id: Option<i64>,
}

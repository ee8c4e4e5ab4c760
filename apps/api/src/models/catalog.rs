use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SampleJobRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary_range: String,
    pub location: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SampleCourseRow {
    pub id: i64,
    pub title: String,
    pub provider: String,
    pub description: String,
    pub skills_gained: Vec<String>,
    pub duration: String,
    pub location: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

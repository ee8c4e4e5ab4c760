//! Persistence collaborators: the curated catalog (`sample_jobs`,
//! `sample_courses`) and the delivered-recommendation history.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::catalog::{SampleCourseRow, SampleJobRow};
use crate::models::history::RecommendationRow;
use crate::recommendations::models::{RecommendationKind, RecommendationSet};

#[derive(Debug, Clone)]
pub enum CatalogRecord {
    Job(SampleJobRow),
    Course(SampleCourseRow),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Catalog rows for `kind`. Jobs are narrowed to locations containing
    /// `location` (case-insensitive) when it is non-empty; courses never are.
    async fn read_matching_records(
        &self,
        kind: RecommendationKind,
        location: &str,
    ) -> Result<Vec<CatalogRecord>>;

    async fn write_record(
        &self,
        user_id: Uuid,
        kind: RecommendationKind,
        set: &RecommendationSet,
    ) -> Result<RecommendationRow>;
}

pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn read_matching_records(
        &self,
        kind: RecommendationKind,
        location: &str,
    ) -> Result<Vec<CatalogRecord>> {
        let records = match kind {
            RecommendationKind::Job => {
                let result = if location.is_empty() {
                    sqlx::query_as::<_, SampleJobRow>("SELECT * FROM sample_jobs ORDER BY id")
                        .fetch_all(&self.pool)
                        .await
                } else {
                    sqlx::query_as::<_, SampleJobRow>(
                        "SELECT * FROM sample_jobs WHERE location ILIKE $1 ORDER BY id",
                    )
                    .bind(format!("%{}%", escape_like(location)))
                    .fetch_all(&self.pool)
                    .await
                };

                result
                    .context("Failed to query sample_jobs")?
                    .into_iter()
                    .map(CatalogRecord::Job)
                    .collect()
            }
            RecommendationKind::Course => {
                sqlx::query_as::<_, SampleCourseRow>("SELECT * FROM sample_courses ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
                    .context("Failed to query sample_courses")?
                    .into_iter()
                    .map(CatalogRecord::Course)
                    .collect()
            }
        };

        Ok(records)
    }

    async fn write_record(
        &self,
        user_id: Uuid,
        kind: RecommendationKind,
        set: &RecommendationSet,
    ) -> Result<RecommendationRow> {
        let content = serde_json::to_value(set).context("Failed to serialize recommendations")?;

        let row = sqlx::query_as::<_, RecommendationRow>(
            r#"
            INSERT INTO recommendations (user_id, type, content, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, user_id, type, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(&content)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert recommendation history")?;

        Ok(row)
    }
}

/// Treats `%`, `_` and `\` in user input as literals inside an ILIKE pattern.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("Nairobi"), "Nairobi");
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
    }
}

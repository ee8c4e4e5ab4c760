//! Composition layer: curated catalog first, AI pipeline second.
//!
//! Results are cached per user for an hour, whichever source produced them.
//! Like the engine underneath it, `get_recommendations` always answers.

use std::cmp::Ordering;
use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::models::catalog::{SampleCourseRow, SampleJobRow};
use crate::recommendations::cache::{
    recommendation_cache_key, Clock, TtlCache, RECOMMENDATION_CACHE_TTL,
};
use crate::recommendations::engine::RecommendationEngine;
use crate::recommendations::models::{
    CourseRecord, JobRecord, Recommendation, RecommendationRequest, RecommendationSet,
};
use crate::recommendations::store::{CatalogRecord, RecordStore};

/// Catalog results below this count hand the request to the AI pipeline.
pub const MIN_CATALOG_RESULTS: usize = 3;
/// Best-scoring catalog rows kept per request.
pub const MAX_CATALOG_RESULTS: usize = 5;

const JOB_SEARCH_BASE: &str = "https://www.brightermonday.co.ke/jobs/";
const COURSE_SEARCH_URL: &str = "https://www.coursera.org/search";

pub struct RecommendationService {
    store: Arc<dyn RecordStore>,
    engine: RecommendationEngine,
    cache: TtlCache<RecommendationSet>,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn RecordStore>, engine: RecommendationEngine) -> Self {
        Self {
            store,
            engine,
            cache: TtlCache::new(RECOMMENDATION_CACHE_TTL),
        }
    }

    pub fn with_clock(
        store: Arc<dyn RecordStore>,
        engine: RecommendationEngine,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            engine,
            cache: TtlCache::with_clock(RECOMMENDATION_CACHE_TTL, clock),
        }
    }

    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
        user_id: Uuid,
    ) -> RecommendationSet {
        let key = recommendation_cache_key(user_id, request);
        if let Some(cached) = self.cache.get(&key) {
            debug!("Recommendation cache hit: {key}");
            return cached;
        }

        let catalog = match self
            .store
            .read_matching_records(request.kind, &request.location)
            .await
        {
            Ok(records) => rank_catalog(records, &request.skills),
            Err(e) => {
                error!("Error getting catalog recommendations: {e:?}");
                Vec::new()
            }
        };

        let set = if catalog.len() >= MIN_CATALOG_RESULTS {
            info!(
                "Serving {} catalog {} recommendations for user {user_id}",
                catalog.len(),
                request.kind
            );
            RecommendationSet::new(catalog)
        } else {
            info!(
                "Only {} catalog {} matches, using AI recommendations",
                catalog.len(),
                request.kind
            );
            self.engine.get_ai_recommendations(request).await
        };

        self.cache.put(key, set.clone());
        set
    }
}

/// Scores catalog rows by skill overlap, best first, ties in catalog order.
pub fn rank_catalog(records: Vec<CatalogRecord>, skills: &[String]) -> Vec<Recommendation> {
    let wanted: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();

    let mut scored: Vec<(f64, CatalogRecord)> = records
        .into_iter()
        .map(|record| (match_score(&record, &wanted), record))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .take(MAX_CATALOG_RESULTS)
        .map(|(_, record)| match record {
            CatalogRecord::Job(row) => Recommendation::Job(job_from_row(row)),
            CatalogRecord::Course(row) => Recommendation::Course(course_from_row(row)),
        })
        .collect()
}

/// Fraction of requested skills the record covers. `wanted` is lowercased.
fn match_score(record: &CatalogRecord, wanted: &[String]) -> f64 {
    let offered = match record {
        CatalogRecord::Job(row) => &row.skills,
        CatalogRecord::Course(row) => &row.skills_gained,
    };
    let offered: Vec<String> = offered.iter().map(|s| s.to_lowercase()).collect();

    let matching = wanted.iter().filter(|skill| offered.contains(skill)).count();
    matching as f64 / wanted.len().max(1) as f64
}

fn job_from_row(row: SampleJobRow) -> JobRecord {
    let url = row
        .url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| job_search_url(&row.title));

    JobRecord {
        title: row.title,
        company: row.company,
        location: row.location,
        skills: row.skills.join(", "),
        salary: row.salary_range,
        description: row.description,
        url: Some(url),
    }
}

fn course_from_row(row: SampleCourseRow) -> CourseRecord {
    let url = row
        .url
        .filter(|u| !u.trim().is_empty())
        .or_else(|| course_search_url(&row.title));

    CourseRecord {
        location: row
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "Online".to_string()),
        title: row.title,
        provider: row.provider,
        skills: row.skills_gained.join(", "),
        duration: row.duration,
        benefits: row.description,
        url,
    }
}

/// `Senior  Data Analyst` → `https://www.brightermonday.co.ke/jobs/senior-data-analyst`
fn job_search_url(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{JOB_SEARCH_BASE}{slug}")
}

fn course_search_url(title: &str) -> Option<String> {
    Url::parse_with_params(COURSE_SEARCH_URL, &[("query", title)])
        .ok()
        .map(String::from)
}

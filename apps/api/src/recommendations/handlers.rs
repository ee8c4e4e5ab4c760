use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::analytics::AnalyticsEvent;
use crate::errors::AppError;
use crate::recommendations::models::{RecommendationKind, RecommendationRequest, RecommendationSet};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationsBody {
    #[serde(alias = "type")]
    pub kind: RecommendationKind,
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: RecommendationSet,
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub user_id: Option<Uuid>,
    pub event: Option<String>,
}

/// POST /api/v1/recommendations
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    Json(body): Json<RecommendationsBody>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    // Blankness is checked on trimmed text, but values reach the cache keys and
    // prompts exactly as sent.
    if body.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "At least one skill is required".to_string(),
        ));
    }
    if body.location.trim().is_empty() {
        return Err(AppError::Validation("Location is required".to_string()));
    }

    let request = RecommendationRequest::new(body.kind, body.skills, body.location);
    let set = state
        .recommendations
        .get_recommendations(&request, body.user_id)
        .await;

    state.analytics.track(
        body.user_id,
        "recommendations_requested",
        json!({
            "type": request.kind,
            "skills": request.skills,
            "location": request.location,
            "count": set.len(),
        }),
    );

    let row = state
        .store
        .write_record(body.user_id, request.kind, &set)
        .await?;
    info!(
        "Stored {} {} recommendations as {} for user {}",
        set.len(),
        request.kind,
        row.id,
        body.user_id
    );

    Ok(Json(RecommendationsResponse {
        recommendations: set,
    }))
}

/// GET /api/v1/analytics/events?user_id=..&event=..
pub async fn handle_analytics_events(
    State(state): State<AppState>,
    Query(params): Query<EventsQuery>,
) -> Result<Json<Vec<AnalyticsEvent>>, AppError> {
    let events = match (params.user_id, params.event.as_deref()) {
        (Some(user_id), Some(event)) => state
            .analytics
            .user_events(user_id)
            .into_iter()
            .filter(|e| e.event == event)
            .collect(),
        (Some(user_id), None) => state.analytics.user_events(user_id),
        (None, Some(event)) => state.analytics.events_by_type(event),
        (None, None) => {
            return Err(AppError::Validation(
                "Either user_id or event is required".to_string(),
            ))
        }
    };

    Ok(Json(events))
}

use std::sync::Arc;

use crate::analytics::AnalyticsLog;
use crate::config::Config;
use crate::recommendations::{RecommendationService, RecordStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
    /// History writes go straight to the store; reads go through the service.
    pub store: Arc<dyn RecordStore>,
    pub analytics: Arc<AnalyticsLog>,
    pub config: Config,
}

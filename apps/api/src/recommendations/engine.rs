//! Orchestrator for AI recommendations.
//!
//! `get_ai_recommendations` never fails. Cache hit → cached set. Cache miss →
//! prompt → completion → parse → validate → cache write. Every upstream or
//! parse failure is logged by class and answered with the static fallback set,
//! which is never cached.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::llm_client::{CompletionError, LlmClient};
use crate::recommendations::cache::{ai_cache_key, Clock, TtlCache, AI_CACHE_TTL};
use crate::recommendations::extractor::FieldExtractor;
use crate::recommendations::fallback::default_set;
use crate::recommendations::models::{RecommendationRequest, RecommendationSet};
use crate::recommendations::parser::ResponseParser;
use crate::recommendations::prompts::build_prompt;
use crate::recommendations::validator::{validate, ValidationError};

/// Why the live pipeline produced nothing usable.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Parse(#[from] ValidationError),
}

pub struct RecommendationEngine {
    llm: LlmClient,
    parser: ResponseParser,
    cache: TtlCache<RecommendationSet>,
}

impl RecommendationEngine {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            parser: ResponseParser::new(FieldExtractor::default()),
            cache: TtlCache::new(AI_CACHE_TTL),
        }
    }

    pub fn with_clock(llm: LlmClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            llm,
            parser: ResponseParser::new(FieldExtractor::default()),
            cache: TtlCache::with_clock(AI_CACHE_TTL, clock),
        }
    }

    /// 1..=6 recommendations for the request, live or fallback.
    pub async fn get_ai_recommendations(&self, request: &RecommendationRequest) -> RecommendationSet {
        let key = ai_cache_key(request);

        if let Some(cached) = self.cache.get(&key) {
            info!("Returning cached data for: {key}");
            return cached;
        }

        match self.acquire(request).await {
            Ok(set) => {
                info!(
                    "Generated {} {} recommendations for {key}",
                    set.len(),
                    request.kind
                );
                self.cache.put(key, set.clone());
                set
            }
            Err(e) => {
                match &e {
                    AcquisitionError::Completion(CompletionError::Config) => {
                        error!("Completion API is not configured, using fallback data")
                    }
                    AcquisitionError::Completion(CompletionError::Auth { status }) => {
                        error!("Completion API rejected the credential ({status}), using fallback data")
                    }
                    AcquisitionError::Completion(CompletionError::RateLimited { attempts }) => {
                        warn!("Rate limited after {attempts} attempts, using fallback data")
                    }
                    AcquisitionError::Completion(CompletionError::Server { status, .. }) => {
                        warn!("Completion API server error {status}, using fallback data")
                    }
                    AcquisitionError::Completion(CompletionError::Network(msg)) => {
                        warn!("Completion API unreachable ({msg}), using fallback data")
                    }
                    AcquisitionError::Completion(CompletionError::Protocol(msg)) => {
                        warn!("Invalid completion response ({msg}), using fallback data")
                    }
                    AcquisitionError::Parse(_) => {
                        warn!("No valid {} recommendations parsed, using fallback data", request.kind)
                    }
                }
                default_set(request.kind)
            }
        }
    }

    async fn acquire(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationSet, AcquisitionError> {
        let prompt = build_prompt(request);
        info!(
            "Requesting {} recommendations: skills=[{}], location={}",
            request.kind,
            request.skills_display(),
            request.location
        );

        let text = self.llm.complete(&prompt.system, &prompt.user).await?;
        let parsed = self.parser.parse(&text, request.kind);
        Ok(validate(parsed.items)?)
    }
}

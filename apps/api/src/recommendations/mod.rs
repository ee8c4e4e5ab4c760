// Recommendation pipeline: catalog lookup, AI completion, parsing, validation,
// caching and the static fallback floor.
// All completion calls go through llm_client.

pub mod cache;
pub mod engine;
pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod links;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod service;
pub mod store;
pub mod validator;

// Re-export the public API consumed by state and main.
pub use engine::RecommendationEngine;
pub use service::RecommendationService;
pub use store::{PgRecordStore, RecordStore};

//! In-process TTL caches for recommendation results.
//!
//! Entries are servable while `now - timestamp < ttl`. Stale entries are not
//! evicted; the next `put` for the same key replaces them. Keys are used exactly
//! as built: no case folding and no skill reordering.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::recommendations::models::RecommendationRequest;

/// TTL of the AI pipeline cache.
pub const AI_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// TTL of the per-user composition cache (catalog-or-AI result).
pub const RECOMMENDATION_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub timestamp: DateTime<Utc>,
}

pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// The cached value for `key`, if present and younger than the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let entry = entries.get(key)?;

        let age = self.clock.now().signed_duration_since(entry.timestamp);
        // A negative age (clock stepped back) counts as fresh.
        let fresh = age.to_std().map(|age| age < self.ttl).unwrap_or(true);

        fresh.then(|| entry.data.clone())
    }

    pub fn put(&self, key: impl Into<String>, data: V) {
        let entry = CacheEntry {
            data,
            timestamp: self.clock.now(),
        };
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), entry);
    }

    /// Number of stored entries, stale ones included.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// `ai-<kind>-<skills joined ",">-<location>`
pub fn ai_cache_key(request: &RecommendationRequest) -> String {
    format!(
        "ai-{}-{}-{}",
        request.kind,
        request.skills.join(","),
        request.location
    )
}

/// `<user>-<kind>-<skills joined ",">-<location>`
pub fn recommendation_cache_key(user_id: Uuid, request: &RecommendationRequest) -> String {
    format!(
        "{}-{}-{}-{}",
        user_id,
        request.kind,
        request.skills.join(","),
        request.location
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// A clock that only moves when told to.
    pub struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Mutex::new(Utc::now()),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += chrono::Duration::from_std(by).unwrap();
        }

        pub fn rewind(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now -= chrono::Duration::from_std(by).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }
}

//! Bounded in-memory analytics log.
//!
//! Holds the most recent `ANALYTICS_CAPACITY` events in append order; the
//! oldest event is dropped first.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

pub const ANALYTICS_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub user_id: Uuid,
    pub event: String,
    pub metadata: Value,
    pub timestamp: DateTime<Utc>,
}

pub struct AnalyticsLog {
    events: Mutex<VecDeque<AnalyticsEvent>>,
    capacity: usize,
}

impl Default for AnalyticsLog {
    fn default() -> Self {
        Self::with_capacity(ANALYTICS_CAPACITY)
    }
}

impl AnalyticsLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn track(&self, user_id: Uuid, event: impl Into<String>, metadata: Value) -> AnalyticsEvent {
        let recorded = AnalyticsEvent {
            user_id,
            event: event.into(),
            metadata,
            timestamp: Utc::now(),
        };
        debug!("Analytics event: {recorded:?}");

        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push_back(recorded.clone());
        while events.len() > self.capacity {
            events.pop_front();
        }

        recorded
    }

    pub fn user_events(&self, user_id: Uuid) -> Vec<AnalyticsEvent> {
        self.filtered(|e| e.user_id == user_id)
    }

    pub fn events_by_type(&self, event: &str) -> Vec<AnalyticsEvent> {
        self.filtered(|e| e.event == event)
    }

    fn filtered(&self, keep: impl Fn(&AnalyticsEvent) -> bool) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|e| keep(e))
            .cloned()
            .collect()
    }
}

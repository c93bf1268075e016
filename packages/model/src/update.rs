//! The realtime update unit
//!
//! Created by a producer at the moment of a confirmed mutation, consumed by
//! zero or more subscribers, and retained only in the broadcast hub's
//! bounded trailing history.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateSubject {
    Page,
    Menu,
    PageMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeUpdate {
    pub subject: UpdateSubject,
    pub action: UpdateAction,
    pub payload: Value,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl RealtimeUpdate {
    pub fn new(subject: UpdateSubject, action: UpdateAction, payload: Value, timestamp: i64) -> Self {
        Self {
            subject,
            action,
            payload,
            timestamp,
        }
    }

    /// Stamp an update with the current wall-clock time.
    pub fn now(subject: UpdateSubject, action: UpdateAction, payload: Value) -> Self {
        Self::new(subject, action, payload, chrono::Utc::now().timestamp_millis())
    }
}

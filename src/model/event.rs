//! Audit event documents
//!
//! An audit event is appended once and never updated. The store assigns
//! the key on insert; everything else is set by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable audit/activity entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Assigned by the store on insert, exactly once
    #[serde(rename = "_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Short event type identifier, e.g. `userRegistered`
    pub event: String,
    /// Owning user, when the event is attributable to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_key: Option<String>,
    /// Study/collection grouping the event belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    pub message: String,
    /// What kind of thing the event is about, e.g. `user`
    pub ref_data: String,
    /// Key of the thing the event is about
    pub ref_key: String,
    /// Arbitrary structured payload
    #[serde(default)]
    pub data: Value,
}

impl AuditEvent {
    pub fn new(
        timestamp: DateTime<Utc>,
        event: impl Into<String>,
        message: impl Into<String>,
        ref_data: impl Into<String>,
        ref_key: impl Into<String>,
    ) -> Self {
        Self {
            key: None,
            timestamp,
            event: event.into(),
            user_key: None,
            study_key: None,
            task_id: None,
            message: message.into(),
            ref_data: ref_data.into(),
            ref_key: ref_key.into(),
            data: Value::Null,
        }
    }

    pub fn user_key(mut self, user_key: impl Into<String>) -> Self {
        self.user_key = Some(user_key.into());
        self
    }

    pub fn study_key(mut self, study_key: impl Into<String>) -> Self {
        self.study_key = Some(study_key.into());
        self
    }

    pub fn task_id(mut self, task_id: i64) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

/// The LIST projection: public event fields plus the owner's email from
/// the user join. Internal-only fields are not part of this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventView {
    #[serde(rename = "_key")]
    pub key: String,
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub user_email: String,
    pub message: String,
    pub ref_data: String,
    pub ref_key: String,
    #[serde(default)]
    pub data: Value,
}

//! Task response documents

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A participant's answer/result submission for a study task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[serde(rename = "_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub user_key: String,
    pub study_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    #[serde(default)]
    pub data: Value,
}

impl TaskResponse {
    pub fn new(user_key: impl Into<String>, study_key: impl Into<String>, data: Value) -> Self {
        Self {
            key: None,
            user_key: user_key.into(),
            study_key: study_key.into(),
            task_id: None,
            data,
        }
    }

    pub fn task_id(mut self, task_id: i64) -> Self {
        self.task_id = Some(task_id);
        self
    }
}

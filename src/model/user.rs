//! User references
//!
//! Users live in their own collection and are read-only from this crate's
//! perspective: the query engine only follows the owner relation to filter
//! and project the contact email. Referential integrity is not enforced
//! here.

use serde::{Deserialize, Serialize};

/// Minimal view of a user document, enough for the owner join
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub email: String,
}

impl UserRecord {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            key: None,
            email: email.into(),
        }
    }
}

//! Convenience re-exports for common studylog usage

// Coordinator and configuration
pub use crate::config::{CollectionNames, StoreConfig};
pub use crate::core::Studylog;

// Error type
pub use crate::errors::StudylogError;

// Services
pub use crate::audit::{AuditLog, ListOptions};
pub use crate::responses::TaskResponses;

// Document shapes
pub use crate::model::{AuditEvent, AuditEventView, TaskResponse, UserRecord};

// Query building
pub use crate::query::{EventFilter, EventQuery, Page, SortDirection};

// Store collaborator
pub use crate::store::{Database, MemoryDatabase};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Value};

//! # Studylog
//!
//! Document-store backed audit trail and task response storage with a
//! dynamic filtered query engine.
//!
//! The heart of the crate is the query pipeline: an open-ended bag of
//! optional filter criteria composes into a conjunction of typed clauses
//! with named bind parameters, which is executed through two result
//! shapes (COUNT and LIST) plus predicate-scoped bulk deletion, all
//! sharing the same composition step. Values never appear in query text;
//! they travel in the bind map.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use studylog::prelude::*;
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let studylog = Studylog::in_memory();
//!     let audit = studylog.audit_log();
//!
//!     audit
//!         .add(
//!             AuditEvent::new(Utc::now(), "userRegistered", "A new user has registered", "user", "u1")
//!                 .user_key("u1"),
//!         )
//!         .await?;
//!
//!     let filter = EventFilter::new().event_type("userRegistered");
//!     let total = audit.count(&filter).await?;
//!     let events = audit.list(&filter, ListOptions::default()).await?;
//!     println!("{total:?} events, newest first: {events:?}");
//!
//!     studylog.close().await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod config;
pub mod core;
pub mod errors;
pub mod model;
pub mod prelude;
pub mod query;
pub mod responses;
pub mod store;

// Re-export the main public types for convenience
pub use crate::audit::{AuditLog, ListOptions};
pub use crate::config::{CollectionNames, StoreConfig};
pub use crate::core::Studylog;
pub use crate::errors::StudylogError;
pub use crate::model::{AuditEvent, AuditEventView, TaskResponse, UserRecord};
pub use crate::query::{EventFilter, EventQuery, Page, SortDirection};
pub use crate::responses::TaskResponses;
pub use crate::store::{Database, MemoryDatabase};

// Re-export external dependencies used in public API
pub use async_trait;
pub use chrono;
pub use serde_json;

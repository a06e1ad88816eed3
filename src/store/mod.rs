//! Document store collaborator
//!
//! The query engine talks to the store through the [`Database`] trait:
//! one call per operation, no multi-step transactions. A network-backed
//! implementation renders [`EventQuery::to_aql`] and submits the text
//! together with [`EventQuery::binds`]; the bundled [`MemoryDatabase`]
//! interprets the structured query directly.

pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StudylogError;
use crate::query::EventQuery;

pub use memory::MemoryDatabase;

/// Store operations the services depend on.
///
/// Connection management, timeouts and retries are the implementation's
/// concern; errors surface as [`StudylogError::Store`] and are never
/// retried by the callers.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run a composed query and eagerly drain the result sequence.
    ///
    /// COUNT queries yield a single aggregate row; LIST queries yield one
    /// shaped record per match.
    async fn execute(&self, query: &EventQuery) -> Result<Vec<Value>, StudylogError>;

    /// Insert a document and return the key the store assigned to it
    async fn save(&self, collection: &str, doc: &Value) -> Result<String, StudylogError>;

    /// Fetch a single document by key; fails with `NotFound` if absent
    async fn document(&self, collection: &str, key: &str) -> Result<Value, StudylogError>;

    /// Replace a document by key; fails with `NotFound` if absent
    async fn replace(&self, collection: &str, key: &str, doc: &Value)
        -> Result<(), StudylogError>;

    /// Remove a document by key; removing an absent key is a no-op
    async fn remove(&self, collection: &str, key: &str) -> Result<(), StudylogError>;

    /// Release the store's resources. Called once at service shutdown.
    async fn close(&self) -> Result<(), StudylogError>;
}

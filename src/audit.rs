//! Audit log service
//!
//! Append-only access to the audit event collection. Counting and listing
//! run the same composed predicate through two result shapes; deletion by
//! owner shares the composer's equality-clause convention. Each operation
//! is a single store round trip with no cross-call state.

use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use crate::config::StoreConfig;
use crate::errors::StudylogError;
use crate::model::{AuditEvent, AuditEventView};
use crate::query::builder::owner_clause;
use crate::query::{EventFilter, EventQuery, FieldRef, Page, SortDirection};
use crate::store::Database;

/// Sort and pagination choices for [`AuditLog::list`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub direction: SortDirection,
    pub page: Option<Page>,
}

impl ListOptions {
    pub fn new(direction: SortDirection, page: Option<Page>) -> Self {
        Self { direction, page }
    }
}

/// Data access for the audit event collection
#[derive(Clone)]
pub struct AuditLog {
    db: Arc<dyn Database>,
    collection: String,
    users_collection: String,
}

impl AuditLog {
    pub fn new(db: Arc<dyn Database>, config: &StoreConfig) -> Self {
        Self {
            db,
            collection: config.collections.audit_log.clone(),
            users_collection: config.collections.users.clone(),
        }
    }

    /// Append a new event; the store assigns the key
    pub async fn add(&self, mut event: AuditEvent) -> Result<AuditEvent, StudylogError> {
        if event.key.is_some() {
            return Err(StudylogError::Validation(
                "a new audit event must not carry a key".to_string(),
            ));
        }
        let doc = serde_json::to_value(&event)
            .map_err(|err| StudylogError::Serialization(err.to_string()))?;
        let key = self.db.save(&self.collection, &doc).await?;
        event.key = Some(key);
        Ok(event)
    }

    /// Fetch one event by key
    pub async fn get(&self, key: &str) -> Result<AuditEvent, StudylogError> {
        require("key", key)?;
        let doc = self.db.document(&self.collection, key).await?;
        from_doc(doc)
    }

    /// Number of events matching the filter.
    ///
    /// Sort and pagination do not apply here. `None` means the aggregation
    /// yielded no row at all, distinct from a count of zero.
    pub async fn count(&self, filter: &EventFilter) -> Result<Option<u64>, StudylogError> {
        let query = EventQuery::count(&self.collection, &self.users_collection, filter)?;
        let rows = self.run(&query).await?;
        match rows.first() {
            None => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                StudylogError::Store("count aggregation yielded a non-numeric row".to_string())
            }),
        }
    }

    /// Events matching the filter, shaped and sorted by timestamp.
    ///
    /// Pagination applies only when [`ListOptions::page`] is set, which
    /// requires both an offset and a page size (see [`Page::from_raw`]).
    pub async fn list(
        &self,
        filter: &EventFilter,
        options: ListOptions,
    ) -> Result<Vec<AuditEventView>, StudylogError> {
        let query = EventQuery::list(
            &self.collection,
            &self.users_collection,
            filter,
            options.direction,
            options.page,
        )?;
        let rows = self.run(&query).await?;
        rows.into_iter().map(from_doc).collect()
    }

    /// Distinct event type identifiers present in the log
    pub async fn event_types(&self) -> Result<Vec<String>, StudylogError> {
        let query = EventQuery::distinct(&self.collection, FieldRef::event("event"));
        let rows = self.run(&query).await?;
        Ok(rows
            .into_iter()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect())
    }

    /// All events owned by one user, unshaped
    pub async fn by_user(&self, user_key: &str) -> Result<Vec<AuditEvent>, StudylogError> {
        require("userKey", user_key)?;
        let (clauses, binds) = owner_clause(user_key)?;
        let query = EventQuery::documents(&self.collection, clauses, binds);
        let rows = self.run(&query).await?;
        rows.into_iter().map(from_doc).collect()
    }

    /// Remove one event by key; removing an absent key is a no-op
    pub async fn delete(&self, key: &str) -> Result<(), StudylogError> {
        require("key", key)?;
        self.db.remove(&self.collection, key).await
    }

    /// Remove every event owned by the given user, used on account purge.
    /// Fire-and-forget: no row count is reported back.
    pub async fn delete_by_user(&self, user_key: &str) -> Result<(), StudylogError> {
        require("userKey", user_key)?;
        let (clauses, binds) = owner_clause(user_key)?;
        let query = EventQuery::remove(&self.collection, clauses, binds);
        self.run(&query).await?;
        Ok(())
    }

    async fn run(&self, query: &EventQuery) -> Result<Vec<Value>, StudylogError> {
        trace!(query = %query.to_aql(), bindings = ?query.binds, "querying audit log");
        self.db.execute(query).await
    }
}

fn require(name: &str, value: &str) -> Result<(), StudylogError> {
    if value.is_empty() {
        return Err(StudylogError::Validation(format!("a {name} must be specified")));
    }
    Ok(())
}

fn from_doc<T: serde::de::DeserializeOwned>(doc: Value) -> Result<T, StudylogError> {
    serde_json::from_value(doc).map_err(|err| StudylogError::Serialization(err.to_string()))
}

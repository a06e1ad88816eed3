//! Task response service
//!
//! Storage for participants' task submissions. Retrieval and bulk
//! deletion scope by owner and/or study through the same equality-clause
//! convention the audit log uses.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::trace;

use crate::config::StoreConfig;
use crate::errors::StudylogError;
use crate::model::TaskResponse;
use crate::query::{BindVars, Clause, EventQuery, FieldRef};
use crate::store::Database;

/// Data access for the task response collection
#[derive(Clone)]
pub struct TaskResponses {
    db: Arc<dyn Database>,
    collection: String,
}

impl TaskResponses {
    pub fn new(db: Arc<dyn Database>, config: &StoreConfig) -> Self {
        Self {
            db,
            collection: config.collections.task_responses.clone(),
        }
    }

    /// Store a new response; the store assigns the key
    pub async fn create(&self, mut response: TaskResponse) -> Result<TaskResponse, StudylogError> {
        if response.key.is_some() {
            return Err(StudylogError::Validation(
                "a new task response must not carry a key".to_string(),
            ));
        }
        let doc = serde_json::to_value(&response)
            .map_err(|err| StudylogError::Serialization(err.to_string()))?;
        let key = self.db.save(&self.collection, &doc).await?;
        response.key = Some(key);
        Ok(response)
    }

    /// Fetch one response by key
    pub async fn get_one(&self, key: &str) -> Result<TaskResponse, StudylogError> {
        require("key", key)?;
        let doc = self.db.document(&self.collection, key).await?;
        from_doc(doc)
    }

    /// Replace an existing response wholesale, keeping its key
    pub async fn replace(
        &self,
        key: &str,
        response: &TaskResponse,
    ) -> Result<(), StudylogError> {
        require("key", key)?;
        let doc = serde_json::to_value(response)
            .map_err(|err| StudylogError::Serialization(err.to_string()))?;
        self.db.replace(&self.collection, key, &doc).await
    }

    pub async fn all(&self) -> Result<Vec<TaskResponse>, StudylogError> {
        self.matching(Vec::new(), BindVars::new()).await
    }

    pub async fn by_user(&self, user_key: &str) -> Result<Vec<TaskResponse>, StudylogError> {
        require("userKey", user_key)?;
        let (clauses, binds) = scope(Some(user_key), None)?;
        self.matching(clauses, binds).await
    }

    pub async fn by_study(&self, study_key: &str) -> Result<Vec<TaskResponse>, StudylogError> {
        require("studyKey", study_key)?;
        let (clauses, binds) = scope(None, Some(study_key))?;
        self.matching(clauses, binds).await
    }

    pub async fn by_user_and_study(
        &self,
        user_key: &str,
        study_key: &str,
    ) -> Result<Vec<TaskResponse>, StudylogError> {
        require("userKey", user_key)?;
        require("studyKey", study_key)?;
        let (clauses, binds) = scope(Some(user_key), Some(study_key))?;
        self.matching(clauses, binds).await
    }

    /// Remove one response by key; removing an absent key is a no-op
    pub async fn delete(&self, key: &str) -> Result<(), StudylogError> {
        require("key", key)?;
        self.db.remove(&self.collection, key).await
    }

    /// Remove every response owned by the given user
    pub async fn delete_by_user(&self, user_key: &str) -> Result<(), StudylogError> {
        require("userKey", user_key)?;
        let (clauses, binds) = scope(Some(user_key), None)?;
        self.remove_matching(clauses, binds).await
    }

    /// Remove every response belonging to the given study
    pub async fn delete_by_study(&self, study_key: &str) -> Result<(), StudylogError> {
        require("studyKey", study_key)?;
        let (clauses, binds) = scope(None, Some(study_key))?;
        self.remove_matching(clauses, binds).await
    }

    async fn matching(
        &self,
        clauses: Vec<Clause>,
        binds: BindVars,
    ) -> Result<Vec<TaskResponse>, StudylogError> {
        let query = EventQuery::documents(&self.collection, clauses, binds);
        let rows = self.run(&query).await?;
        rows.into_iter().map(from_doc).collect()
    }

    async fn remove_matching(
        &self,
        clauses: Vec<Clause>,
        binds: BindVars,
    ) -> Result<(), StudylogError> {
        let query = EventQuery::remove(&self.collection, clauses, binds);
        self.run(&query).await?;
        Ok(())
    }

    async fn run(&self, query: &EventQuery) -> Result<Vec<Value>, StudylogError> {
        trace!(query = %query.to_aql(), bindings = ?query.binds, "querying task responses");
        self.db.execute(query).await
    }
}

fn scope(
    user_key: Option<&str>,
    study_key: Option<&str>,
) -> Result<(Vec<Clause>, BindVars), StudylogError> {
    let mut clauses = Vec::new();
    let mut binds = BindVars::new();
    if let Some(user_key) = user_key {
        clauses.push(Clause::eq(FieldRef::event("userKey"), "userKey"));
        binds.insert("userKey", json!(user_key))?;
    }
    if let Some(study_key) = study_key {
        clauses.push(Clause::eq(FieldRef::event("studyKey"), "studyKey"));
        binds.insert("studyKey", json!(study_key))?;
    }
    Ok((clauses, binds))
}

fn require(name: &str, value: &str) -> Result<(), StudylogError> {
    if value.is_empty() {
        return Err(StudylogError::Validation(format!("a {name} must be specified")));
    }
    Ok(())
}

fn from_doc(doc: Value) -> Result<TaskResponse, StudylogError> {
    serde_json::from_value(doc).map_err(|err| StudylogError::Serialization(err.to_string()))
}

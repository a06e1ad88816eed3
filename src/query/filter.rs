//! Predicate composition
//!
//! [`EventFilter`] is the open-ended bag of optional filter criteria a
//! caller may combine. [`EventFilter::compose`] turns the active criteria
//! into an ordered conjunction of typed clauses plus their bind values,
//! and reports whether any clause needs the joined user entity.
//!
//! Clauses combine with logical AND only; there is no OR, NOT or nested
//! grouping in this filter set. Zero active criteria compose into the
//! empty conjunction, which matches every record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::errors::StudylogError;
use crate::query::bind::BindVars;
use crate::query::clause::{Clause, FieldRef};

/// Optional filter criteria for audit event queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Lower inclusive bound on the event timestamp
    pub after: Option<DateTime<Utc>>,
    /// Upper inclusive bound on the event timestamp
    pub before: Option<DateTime<Utc>>,
    pub event_type: Option<String>,
    pub study_key: Option<String>,
    pub task_id: Option<i64>,
    /// Substring matched case-insensitively against the owner's email
    pub user_email: Option<String>,
}

/// Composed conjunction of predicate clauses
#[derive(Debug, Clone)]
pub struct Predicate {
    pub clauses: Vec<Clause>,
    pub binds: BindVars,
    /// True when a clause filters on the joined user entity
    pub requires_join: bool,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }

    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
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

    pub fn user_email(mut self, user_email: impl Into<String>) -> Self {
        self.user_email = Some(user_email.into());
        self
    }

    /// Build the clause conjunction for the active criteria.
    ///
    /// Clause order is fixed for plan stability; it carries no semantic
    /// weight since the clauses are independent and ANDed.
    pub fn compose(&self) -> Result<Predicate, StudylogError> {
        let mut clauses = Vec::new();
        let mut binds = BindVars::new();

        if let Some(after) = &self.after {
            clauses.push(Clause::gte(FieldRef::event("timestamp"), "after"));
            binds.insert("after", timestamp_value(after))?;
        }
        if let Some(before) = &self.before {
            clauses.push(Clause::lte(FieldRef::event("timestamp"), "before"));
            binds.insert("before", timestamp_value(before))?;
        }
        if let Some(event_type) = given(&self.event_type) {
            clauses.push(Clause::eq(FieldRef::event("event"), "eventType"));
            binds.insert("eventType", json!(event_type))?;
        }
        if let Some(study_key) = given(&self.study_key) {
            clauses.push(Clause::eq(FieldRef::event("studyKey"), "studyKey"));
            binds.insert("studyKey", json!(study_key))?;
        }
        if let Some(task_id) = self.task_id {
            clauses.push(Clause::eq(FieldRef::event("taskId"), "taskId"));
            binds.insert("taskId", json!(task_id))?;
        }
        if let Some(user_email) = given(&self.user_email) {
            clauses.push(Clause::contains_insensitive(
                FieldRef::user("email"),
                "userEmail",
            ));
            binds.insert("userEmail", json!(user_email))?;
        }

        let requires_join = clauses.iter().any(Clause::needs_user_source);
        Ok(Predicate {
            clauses,
            binds,
            requires_join,
        })
    }
}

/// Callers may pass empty strings for criteria they did not fill in;
/// those count as absent.
fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn timestamp_value(ts: &DateTime<Utc>) -> Value {
    Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

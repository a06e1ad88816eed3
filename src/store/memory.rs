//! In-memory document store
//!
//! Default [`Database`] backend: per-collection ordered maps of JSON
//! documents behind an async lock. Queries are interpreted structurally
//! from the [`EventQuery`] instead of parsing the rendered text, with the
//! same semantics a query-language backend would apply: inner equality
//! join on the owner key, inclusive range comparisons on timestamps,
//! stable timestamp sort, offset/size window.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::StudylogError;
use crate::query::{Clause, Comparator, EventQuery, Shape, SortDirection, SourceAlias};
use crate::store::Database;

type Collection = BTreeMap<String, Value>;

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    async fn execute_remove(&self, query: &EventQuery) -> Result<Vec<Value>, StudylogError> {
        let mut guard = self.collections.write().await;
        let Some(collection) = guard.get_mut(&query.collection) else {
            return Ok(Vec::new());
        };
        let mut doomed = Vec::new();
        for (key, doc) in collection.iter() {
            if matches_clauses(query, doc, None)? {
                doomed.push(key.clone());
            }
        }
        for key in doomed {
            collection.remove(&key);
        }
        Ok(Vec::new())
    }

    async fn execute_read(&self, query: &EventQuery) -> Result<Vec<Value>, StudylogError> {
        let guard = self.collections.read().await;
        let empty = Collection::new();
        let docs = guard.get(&query.collection).unwrap_or(&empty);
        let users = query
            .join
            .as_ref()
            .map(|join| guard.get(&join.collection).unwrap_or(&empty));

        // cross product with the owner equality link: an event whose
        // owner key matches no user drops out of joined results
        let mut rows: Vec<(&Value, Option<&Value>)> = Vec::new();
        for doc in docs.values() {
            let user = match users {
                Some(users) => {
                    let Some(user) = doc
                        .get("userKey")
                        .and_then(Value::as_str)
                        .and_then(|key| users.get(key))
                    else {
                        continue;
                    };
                    Some(user)
                }
                None => None,
            };
            if matches_clauses(query, doc, user)? {
                rows.push((doc, user));
            }
        }

        match &query.shape {
            Shape::Count => Ok(vec![json!(rows.len() as u64)]),
            Shape::List { direction, page } => {
                rows.sort_by(|a, b| {
                    let ordering = compare_timestamps(a.0, b.0);
                    match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                });
                let windowed: Box<dyn Iterator<Item = &(&Value, Option<&Value>)>> = match page {
                    Some(page) => Box::new(
                        rows.iter()
                            .skip(page.offset.max(0) as usize)
                            .take(page.rows.max(0) as usize),
                    ),
                    None => Box::new(rows.iter()),
                };
                Ok(windowed.map(|(doc, user)| project(doc, *user)).collect())
            }
            Shape::Documents => Ok(rows.into_iter().map(|(doc, _)| doc.clone()).collect()),
            Shape::Distinct(field) => {
                let values: BTreeSet<String> = rows
                    .iter()
                    .filter_map(|(doc, _)| doc.get(field.name))
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                Ok(values.into_iter().map(Value::String).collect())
            }
            Shape::Remove => unreachable!("handled by execute_remove"),
        }
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn execute(&self, query: &EventQuery) -> Result<Vec<Value>, StudylogError> {
        match query.shape {
            Shape::Remove => self.execute_remove(query).await,
            _ => self.execute_read(query).await,
        }
    }

    async fn save(&self, collection: &str, doc: &Value) -> Result<String, StudylogError> {
        if !doc.is_object() {
            return Err(StudylogError::Store(
                "only object documents can be saved".to_string(),
            ));
        }
        let key = Uuid::new_v4().to_string();
        let mut doc = doc.clone();
        doc["_key"] = json!(key);
        let mut guard = self.collections.write().await;
        guard.entry(collection.to_string()).or_default().insert(key.clone(), doc);
        Ok(key)
    }

    async fn document(&self, collection: &str, key: &str) -> Result<Value, StudylogError> {
        let guard = self.collections.read().await;
        guard
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned()
            .ok_or_else(|| StudylogError::NotFound(format!("document {key} in {collection}")))
    }

    async fn replace(
        &self,
        collection: &str,
        key: &str,
        doc: &Value,
    ) -> Result<(), StudylogError> {
        let mut guard = self.collections.write().await;
        let docs = guard
            .get_mut(collection)
            .filter(|docs| docs.contains_key(key))
            .ok_or_else(|| StudylogError::NotFound(format!("document {key} in {collection}")))?;
        let mut doc = doc.clone();
        doc["_key"] = json!(key);
        docs.insert(key.to_string(), doc);
        Ok(())
    }

    async fn remove(&self, collection: &str, key: &str) -> Result<(), StudylogError> {
        let mut guard = self.collections.write().await;
        if let Some(docs) = guard.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), StudylogError> {
        Ok(())
    }
}

fn matches_clauses(
    query: &EventQuery,
    doc: &Value,
    user: Option<&Value>,
) -> Result<bool, StudylogError> {
    for clause in &query.clauses {
        let bound = query.binds.get(clause.bind).ok_or_else(|| {
            StudylogError::Store(format!("no value bound for @{}", clause.bind))
        })?;
        let field = match clause.field.source {
            SourceAlias::Event => doc.get(clause.field.name),
            SourceAlias::User => user.and_then(|user| user.get(clause.field.name)),
        };
        let Some(field) = field.filter(|v| !v.is_null()) else {
            return Ok(false);
        };
        if !clause_holds(clause, field, bound) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn clause_holds(clause: &Clause, field: &Value, bound: &Value) -> bool {
    match clause.comparator {
        Comparator::Eq => values_equal(field, bound),
        Comparator::Gte => {
            compare_values(field, bound).is_some_and(|ordering| ordering != Ordering::Less)
        }
        Comparator::Lte => {
            compare_values(field, bound).is_some_and(|ordering| ordering != Ordering::Greater)
        }
        Comparator::ContainsInsensitive => match (field.as_str(), bound.as_str()) {
            (Some(field), Some(needle)) => {
                field.to_lowercase().contains(&needle.to_lowercase())
            }
            _ => false,
        },
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    if let (Some(a), Some(b)) = (a.as_f64(), b.as_f64()) {
        return a == b;
    }
    a == b
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (a.as_str(), b.as_str()) {
        if let (Ok(a), Ok(b)) = (
            DateTime::parse_from_rfc3339(a),
            DateTime::parse_from_rfc3339(b),
        ) {
            return Some(a.cmp(&b));
        }
        return Some(a.cmp(b));
    }
    if let (Some(a), Some(b)) = (a.as_f64(), b.as_f64()) {
        return a.partial_cmp(&b);
    }
    None
}

/// Sort key for LIST mode; documents without a parseable timestamp sort first
fn compare_timestamps(a: &Value, b: &Value) -> Ordering {
    let parse = |doc: &Value| {
        doc.get("timestamp")
            .and_then(Value::as_str)
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
    };
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The LIST projection, mirroring the rendered RETURN shape
fn project(doc: &Value, user: Option<&Value>) -> Value {
    json!({
        "_key": doc.get("_key").cloned().unwrap_or(Value::Null),
        "timestamp": doc.get("timestamp").cloned().unwrap_or(Value::Null),
        "event": doc.get("event").cloned().unwrap_or(Value::Null),
        "userEmail": user.and_then(|user| user.get("email")).cloned().unwrap_or(Value::Null),
        "message": doc.get("message").cloned().unwrap_or(Value::Null),
        "refData": doc.get("refData").cloned().unwrap_or(Value::Null),
        "refKey": doc.get("refKey").cloned().unwrap_or(Value::Null),
        "data": doc.get("data").cloned().unwrap_or(Value::Null),
    })
}

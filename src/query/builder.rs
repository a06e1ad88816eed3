//! Structured query construction
//!
//! [`EventQuery`] is the abstract form of a store query: source
//! collection(s), clause conjunction, bind values and output shape. It is
//! what the services hand to a [`crate::store::Database`]; the
//! [`crate::query::aql`] compiler renders it into query text on demand.

use serde_json::json;

use crate::errors::StudylogError;
use crate::query::aql::AqlGenerator;
use crate::query::bind::BindVars;
use crate::query::clause::{Clause, FieldRef};
use crate::query::filter::EventFilter;
use crate::query::ordering::SortDirection;
use crate::query::pagination::Page;

/// Widening of the query source to the user collection.
///
/// The link is always the owner equality `user._key == log.userKey`; an
/// event whose owner key matches no user drops out of joined results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserJoin {
    pub collection: String,
}

/// Output shape of a query over the same predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Single non-negative integer: the number of matches
    Count,
    /// Shaped records joined with the owning user, sorted by timestamp
    List {
        direction: SortDirection,
        page: Option<Page>,
    },
    /// Full documents in store order, no join
    Documents,
    /// Distinct values of a single event field
    Distinct(FieldRef),
    /// Predicate-scoped removal, yields nothing
    Remove,
}

/// A complete query against the document store
#[derive(Debug, Clone)]
pub struct EventQuery {
    pub collection: String,
    pub join: Option<UserJoin>,
    pub clauses: Vec<Clause>,
    pub binds: BindVars,
    pub shape: Shape,
}

impl EventQuery {
    /// COUNT mode. Sort and pagination do not apply; the user join is
    /// included only when the filter itself reaches into the user entity,
    /// never for the projection's sake.
    pub fn count(
        collection: impl Into<String>,
        users_collection: impl Into<String>,
        filter: &EventFilter,
    ) -> Result<Self, StudylogError> {
        let predicate = filter.compose()?;
        let join = predicate.requires_join.then(|| UserJoin {
            collection: users_collection.into(),
        });
        Ok(Self {
            collection: collection.into(),
            join,
            clauses: predicate.clauses,
            binds: predicate.binds,
            shape: Shape::Count,
        })
    }

    /// LIST mode. Always joins the user collection: the projection exposes
    /// the owner's email, which only the join can provide.
    pub fn list(
        collection: impl Into<String>,
        users_collection: impl Into<String>,
        filter: &EventFilter,
        direction: SortDirection,
        page: Option<Page>,
    ) -> Result<Self, StudylogError> {
        let predicate = filter.compose()?;
        let mut binds = predicate.binds;
        if let Some(page) = &page {
            binds.insert("offset", json!(page.offset))?;
            binds.insert("rowsPerPage", json!(page.rows))?;
        }
        Ok(Self {
            collection: collection.into(),
            join: Some(UserJoin {
                collection: users_collection.into(),
            }),
            clauses: predicate.clauses,
            binds,
            shape: Shape::List { direction, page },
        })
    }

    /// Full documents matching an explicit clause conjunction, no join
    pub fn documents(collection: impl Into<String>, clauses: Vec<Clause>, binds: BindVars) -> Self {
        Self {
            collection: collection.into(),
            join: None,
            clauses,
            binds,
            shape: Shape::Documents,
        }
    }

    /// Distinct values of one event field across the whole collection
    pub fn distinct(collection: impl Into<String>, field: FieldRef) -> Self {
        Self {
            collection: collection.into(),
            join: None,
            clauses: Vec::new(),
            binds: BindVars::new(),
            shape: Shape::Distinct(field),
        }
    }

    /// Remove every document matching an explicit clause conjunction
    pub fn remove(collection: impl Into<String>, clauses: Vec<Clause>, binds: BindVars) -> Self {
        Self {
            collection: collection.into(),
            join: None,
            clauses,
            binds,
            shape: Shape::Remove,
        }
    }

    /// Render the query text; together with [`Self::binds`] this is the
    /// `(queryText, bindings)` pair a network-backed store submits.
    pub fn to_aql(&self) -> String {
        AqlGenerator::render(self)
    }
}

/// Convenience for the single-clause owner predicate shared by the owner
/// fetch and the bulk owner delete.
pub fn owner_clause(user_key: &str) -> Result<(Vec<Clause>, BindVars), StudylogError> {
    let mut binds = BindVars::new();
    binds.insert("userKey", json!(user_key))?;
    Ok((
        vec![Clause::eq(FieldRef::event("userKey"), "userKey")],
        binds,
    ))
}

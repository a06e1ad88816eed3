//! Typed predicate clauses
//!
//! Clauses are plain data: a field reference, a comparator and the name of
//! the bind parameter holding the comparison value. Rendering into query
//! text happens in a separate step (see [`crate::query::aql`]), so a value
//! can never leak into the query text itself.

/// Comparison operators supported by the filter set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Gte,
    Lte,
    /// Case-insensitive substring match
    ContainsInsensitive,
}

/// Which query source a field lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceAlias {
    /// The primary event collection, aliased `log`
    Event,
    /// The joined user collection, aliased `user`
    User,
}

impl SourceAlias {
    pub fn as_aql(&self) -> &'static str {
        match self {
            SourceAlias::Event => "log",
            SourceAlias::User => "user",
        }
    }
}

/// A field on one of the query sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef {
    pub source: SourceAlias,
    pub name: &'static str,
}

impl FieldRef {
    pub fn event(name: &'static str) -> Self {
        Self {
            source: SourceAlias::Event,
            name,
        }
    }

    pub fn user(name: &'static str) -> Self {
        Self {
            source: SourceAlias::User,
            name,
        }
    }

    /// Dotted form used in query text, e.g. `log.timestamp`
    pub fn render(&self) -> String {
        format!("{}.{}", self.source.as_aql(), self.name)
    }
}

/// Single condition in the predicate conjunction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: FieldRef,
    pub comparator: Comparator,
    /// Name of the bind parameter carrying the comparison value
    pub bind: &'static str,
}

impl Clause {
    pub fn new(field: FieldRef, comparator: Comparator, bind: &'static str) -> Self {
        Self {
            field,
            comparator,
            bind,
        }
    }

    /// Exact equality condition
    pub fn eq(field: FieldRef, bind: &'static str) -> Self {
        Self::new(field, Comparator::Eq, bind)
    }

    /// Greater-or-equal condition
    pub fn gte(field: FieldRef, bind: &'static str) -> Self {
        Self::new(field, Comparator::Gte, bind)
    }

    /// Less-or-equal condition
    pub fn lte(field: FieldRef, bind: &'static str) -> Self {
        Self::new(field, Comparator::Lte, bind)
    }

    /// Case-insensitive substring condition
    pub fn contains_insensitive(field: FieldRef, bind: &'static str) -> Self {
        Self::new(field, Comparator::ContainsInsensitive, bind)
    }

    /// True when this clause reads a field of the joined user entity
    pub fn needs_user_source(&self) -> bool {
        self.field.source == SourceAlias::User
    }
}

//! Dynamic filtered query engine
//!
//! The pipeline is: a loose bag of optional criteria ([`EventFilter`])
//! composes into typed clauses plus bind values ([`filter`]), which a
//! builder assembles with join and shape decisions into an [`EventQuery`]
//! ([`builder`]), which the [`aql`] step renders into query text for the
//! store. Composition, binding and rendering are pure functions with no
//! cross-call state.

pub mod aql;
pub mod bind;
pub mod builder;
pub mod clause;
pub mod filter;
pub mod ordering;
pub mod pagination;

#[cfg(test)]
mod tests;

pub use aql::AqlGenerator;
pub use bind::BindVars;
pub use builder::{EventQuery, Shape, UserJoin};
pub use clause::{Clause, Comparator, FieldRef, SourceAlias};
pub use filter::{EventFilter, Predicate};
pub use ordering::SortDirection;
pub use pagination::Page;

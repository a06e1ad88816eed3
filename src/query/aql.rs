//! Query text generation
//!
//! Compiles an [`EventQuery`] into AQL text. Values never appear in the
//! output; every clause references its bind parameter by `@name`, and the
//! sort keyword and pagination placeholders come from typed inputs.

use crate::query::builder::{EventQuery, Shape};
use crate::query::clause::{Clause, Comparator};

pub struct AqlGenerator;

impl AqlGenerator {
    /// Render the complete query text for `query`
    pub fn render(query: &EventQuery) -> String {
        let mut parts: Vec<String> = Vec::new();

        if matches!(query.shape, Shape::Count) {
            parts.push("RETURN COUNT (".to_string());
        }

        parts.push(format!("FOR log IN {}", query.collection));

        if let Some(join) = &query.join {
            parts.push(format!(
                "FOR user IN {} FILTER user._key == log.userKey",
                join.collection
            ));
        }

        for clause in &query.clauses {
            parts.push(Self::render_clause(clause));
        }

        match &query.shape {
            Shape::Count => {
                parts.push("RETURN 1 )".to_string());
            }
            Shape::List { direction, page } => {
                parts.push(format!("SORT log.timestamp {}", direction.as_aql()));
                if page.is_some() {
                    parts.push("LIMIT @offset, @rowsPerPage".to_string());
                }
                parts.push(Self::render_projection());
            }
            Shape::Documents => {
                parts.push("RETURN log".to_string());
            }
            Shape::Distinct(field) => {
                parts.push(format!("RETURN DISTINCT {}", field.render()));
            }
            Shape::Remove => {
                parts.push(format!("REMOVE log IN {}", query.collection));
            }
        }

        parts.join(" ")
    }

    fn render_clause(clause: &Clause) -> String {
        let field = clause.field.render();
        match clause.comparator {
            Comparator::Eq => format!("FILTER {} == @{}", field, clause.bind),
            Comparator::Gte => format!("FILTER {} >= @{}", field, clause.bind),
            Comparator::Lte => format!("FILTER {} <= @{}", field, clause.bind),
            Comparator::ContainsInsensitive => format!(
                "FILTER LIKE({}, CONCAT('%', @{}, '%'), true)",
                field, clause.bind
            ),
        }
    }

    /// The LIST projection: public fields plus the joined owner email,
    /// internal fields dropped
    fn render_projection() -> String {
        "RETURN { _key: log._key, timestamp: log.timestamp, event: log.event, \
         userEmail: user.email, message: log.message, refData: log.refData, \
         refKey: log.refKey, data: log.data }"
            .to_string()
    }
}

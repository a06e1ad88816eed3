//! Pagination window
//!
//! Pagination is applied only when both the offset and the page size are
//! supplied. A single value on its own means "no pagination requested",
//! not an error; a supplied value that is not numeric is a caller error
//! whether or not the other value is present.

use crate::errors::StudylogError;

/// Offset/size window applied to a LIST query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub rows: i64,
}

impl Page {
    pub fn new(offset: i64, rows: i64) -> Self {
        Self { offset, rows }
    }

    /// Coerce raw caller-supplied parameters into a pagination window.
    ///
    /// Empty strings count as absent. Returns `Ok(None)` unless both values
    /// are present and numeric.
    pub fn from_raw(
        offset: Option<&str>,
        rows: Option<&str>,
    ) -> Result<Option<Page>, StudylogError> {
        let offset = parse_index("offset", offset)?;
        let rows = parse_index("rowsPerPage", rows)?;
        match (offset, rows) {
            (Some(offset), Some(rows)) => Ok(Some(Page::new(offset, rows))),
            _ => Ok(None),
        }
    }
}

fn parse_index(name: &str, raw: Option<&str>) -> Result<Option<i64>, StudylogError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<i64>().map(Some).map_err(|_| {
        StudylogError::Validation(format!("{name} must be an integer, got \"{raw}\""))
    })
}

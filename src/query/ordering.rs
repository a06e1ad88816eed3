//! Sort direction for LIST queries

/// Direction of the timestamp sort applied in LIST mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_aql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Most recent first when the caller does not specify a direction
impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Desc
    }
}

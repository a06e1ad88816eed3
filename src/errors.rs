use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudylogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Duplicate bind parameter: {0}")]
    BindCollision(&'static str),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl StudylogError {
    /// True when the error is the single-key "document does not exist" case,
    /// as opposed to a zero-match query result (which is not an error at all).
    pub fn is_not_found(&self) -> bool {
        matches!(self, StudylogError::NotFound(_))
    }
}

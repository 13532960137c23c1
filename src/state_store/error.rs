use thiserror::Error;

/// Failures of a state store lookup. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No daily file matches the lookup.
    #[error("{0}")]
    NotFound(String),
    /// A daily file exists but cannot be read or parsed.
    #[error("{0}")]
    Read(String),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not_found",
            StoreError::Read(_) => "read_error",
        }
    }
}

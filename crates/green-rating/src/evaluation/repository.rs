use super::domain::{EvaluationRecord, EvaluationResult};

/// Append-only storage for scored evaluations.
pub trait EvaluationRepository: Send + Sync {
    /// Persists one result atomically, assigning its id and timestamp.
    fn append(&self, result: EvaluationResult) -> Result<EvaluationRecord, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("evaluation store unavailable: {0}")]
    Unavailable(String),
    #[error("evaluation store returned an unreadable row: {0}")]
    Corrupt(String),
}

use crate::domain::validation::ValidationError;

/// Errors surfaced by domain services
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl DomainError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound { kind, id: id.into() }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

/// Failures returned by service functions.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested client does not exist.
    #[error("Entity not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message) => ServiceError::Validation(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Message shown when the backend did not explain the failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Внутренняя ошибка сервера";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Backend error ({status}): {}", .detail.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Backend {
        status: u16,
        detail: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub fn from_status(status: StatusCode, detail: Option<String>) -> Self {
        if status == StatusCode::NOT_FOUND {
            return RepositoryError::NotFound;
        }
        RepositoryError::Backend {
            status: status.as_u16(),
            detail,
        }
    }

    /// Text supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            RepositoryError::Backend { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RepositoryError::from_status(status, None)
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}

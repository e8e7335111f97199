// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Failures surfaced to callers of the publishing pipeline and listing engine.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("slug allocation exhausted: {0}")]
    SlugCollisionExhausted(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::InvalidTransition { from, to } => {
                let msg = if from == to {
                    format!("{from} posts cannot be modified")
                } else {
                    format!("cannot move a post from {from} to {to}")
                };
                Self::InvalidTransition(msg)
            }
            DomainError::SlugExhausted(msg) => Self::SlugCollisionExhausted(msg),
            DomainError::SlugTaken(msg) | DomainError::Conflict(msg) => Self::Conflict(msg),
            DomainError::Unavailable(msg) => Self::StoreUnavailable(msg),
            DomainError::Persistence(msg) => Self::Infrastructure(msg),
        }
    }
}

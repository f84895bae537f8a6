use thiserror::Error;

/// Errors that are safe to expose to other modules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl LifecycleError {
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for LifecycleError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            NotFound { entity, key } => Self::not_found(entity, key),
            Conflict { message } => Self::conflict(message),
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            InvalidQuery(e) => Self::validation(e.to_string()),
            Storage(e) => {
                tracing::error!(error = ?e, "storage failure");
                Self::internal()
            }
        }
    }
}

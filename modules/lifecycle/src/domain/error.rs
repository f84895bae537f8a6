use thiserror::Error;

use crate::domain::store::StoreError;

/// Domain-level errors. Storage failures keep their source chain.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid search query: {0}")]
    InvalidQuery(#[from] search_core::Error),

    #[error("Storage failure: {0:#}")]
    Storage(anyhow::Error),
}

impl DomainError {
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(err: anyhow::Error) -> Self {
        Self::Storage(err)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(message) => Self::conflict(message),
            StoreError::Query(e) => Self::InvalidQuery(e),
            StoreError::Backend(e) => Self::storage(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_conflict_not_not_found() {
        let err: DomainError = StoreError::UniqueViolation("states.label".into()).into();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_message_names_entity_and_key() {
        let err = DomainError::not_found("Province", 7);
        assert_eq!(err.to_string(), "Province not found: 7");
    }

    #[test]
    fn backend_error_keeps_context() {
        let err: DomainError =
            StoreError::Backend(anyhow::anyhow!("connection reset").context("find_all failed"))
                .into();
        let msg = err.to_string();
        assert!(msg.contains("find_all failed"));
        assert!(msg.contains("connection reset"));
    }
}

//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Could not find model with the given id: {0}")]
    ModelNotFound(u32),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid endorsement value: {0} (expected -1, 0 or 1)")]
    InvalidEndorsement(i64),
}

impl DomainError {
    /// Check if this error means the requested model id is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::ModelNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = DomainError::ModelNotFound(7);
        assert_eq!(
            error.to_string(),
            "Could not find model with the given id: 7"
        );
    }

    #[test]
    fn test_is_not_found_check() {
        assert!(DomainError::ModelNotFound(1).is_not_found());
        assert!(!DomainError::InvalidModel("empty".to_string()).is_not_found());
        assert!(!DomainError::InvalidEndorsement(2).is_not_found());
    }
}

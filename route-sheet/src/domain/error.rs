//! Domain error types.
//!
//! These errors represent validation failures in user input. They are
//! distinct from API and workbook errors.

/// Domain-level errors for input validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Origin or destination left blank (1-based position)
    #[error("origin and destination are required (entry {position} is empty)")]
    MissingEndpoint { position: usize },

    /// Stop request outside the supported 2-4 entries
    #[error("a route needs 2 to 4 stops, got {0}")]
    InvalidStopCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::MissingEndpoint { position: 1 };
        assert_eq!(
            err.to_string(),
            "origin and destination are required (entry 1 is empty)"
        );

        let err = DomainError::InvalidStopCount(5);
        assert_eq!(err.to_string(), "a route needs 2 to 4 stops, got 5");
    }
}

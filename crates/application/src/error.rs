//! Application-level errors

use domain::{DomainError, TravelMode};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No hospital is currently selected
    #[error("No destination selected")]
    NoSelection,

    /// The requested mode has no route to show
    #[error("{} route is not available", mode.label())]
    ModeUnavailable {
        /// Requested mode
        mode: TravelMode,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_unavailable_display() {
        let err = ApplicationError::ModeUnavailable {
            mode: TravelMode::Transit,
        };
        assert_eq!(err.to_string(), "대중교통 route is not available");
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: ApplicationError = DomainError::ValidationError("bad".to_string()).into();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[test]
    fn test_no_selection_display() {
        assert_eq!(ApplicationError::NoSelection.to_string(), "No destination selected");
    }
}

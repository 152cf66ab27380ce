//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// A coordinate string could not be parsed
    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinateFormat(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

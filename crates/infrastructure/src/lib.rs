//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the driving
//! and transit integration crates, and provides configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DrivingAppConfig, PresentationAppConfig, TransitAppConfig};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};

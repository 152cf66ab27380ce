//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `careroute.toml` (or an explicit file), then `CAREROUTE_*` environment
//! variables. Nested keys use a double underscore, e.g.
//! `CAREROUTE_TRANSIT__API_KEY` or `CAREROUTE_PRESENTATION__TRANSIT_DELAY_MS`.
//!
//! - `integrations`: driving and transit provider settings

mod integrations;

use std::path::Path;

use application::PresentationConfig;
use domain::geometry::WalkingPolicy;
use domain::geometry::walking::{DEFAULT_MIN_MINUTES_PER_LEG, DEFAULT_WALKING_SPEED_KMH};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use integrations::{DrivingAppConfig, TransitAppConfig};

use crate::telemetry::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CAREROUTE";

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "careroute";

/// Presentation and walking estimate settings (`[presentation]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationAppConfig {
    /// Delay between the driving and the transit request in milliseconds
    #[serde(default = "default_transit_delay_ms")]
    pub transit_delay_ms: u64,

    /// Walking speed used for distance-based estimates
    #[serde(default = "default_walking_speed_kmh")]
    pub walking_speed_kmh: f64,

    /// Minimum walking minutes per walking leg when the total comes out as zero
    #[serde(default = "default_min_walking_minutes")]
    pub min_walking_minutes_per_leg: u32,
}

fn default_transit_delay_ms() -> u64 {
    PresentationConfig::default().transit_delay_ms
}

const fn default_walking_speed_kmh() -> f64 {
    DEFAULT_WALKING_SPEED_KMH
}

const fn default_min_walking_minutes() -> u32 {
    DEFAULT_MIN_MINUTES_PER_LEG
}

impl Default for PresentationAppConfig {
    fn default() -> Self {
        Self {
            transit_delay_ms: default_transit_delay_ms(),
            walking_speed_kmh: default_walking_speed_kmh(),
            min_walking_minutes_per_leg: default_min_walking_minutes(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Driving directions provider
    #[serde(default)]
    pub driving: DrivingAppConfig,

    /// Transit directions provider
    #[serde(default)]
    pub transit: TransitAppConfig,

    /// Presentation timing and walking estimates
    #[serde(default)]
    pub presentation: PresentationAppConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `careroute.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required) or the default file
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, environment_source())
    }

    fn load_with(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(config = ?app, "Configuration loaded");
        Ok(app)
    }

    /// Check every section
    ///
    /// Missing API keys are not an error here; the affected mode reports
    /// itself as not configured at request time.
    pub fn validate(&self) -> Result<(), String> {
        self.driving
            .to_driving_config()
            .validate()
            .map_err(|e| format!("driving: {e}"))?;
        self.transit
            .to_transit_config()
            .validate()
            .map_err(|e| format!("transit: {e}"))?;
        self.presentation_config()
            .validate()
            .map_err(|e| format!("presentation: {e}"))?;

        let speed = self.presentation.walking_speed_kmh;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(format!(
                "presentation: walking_speed_kmh must be positive, got {speed}"
            ));
        }
        Ok(())
    }

    /// Settings for the presentation service
    #[must_use]
    pub fn presentation_config(&self) -> PresentationConfig {
        PresentationConfig {
            transit_delay_ms: self.presentation.transit_delay_ms,
        }
    }

    /// Walking estimate policy for transit itineraries
    #[must_use]
    pub fn walking_policy(&self) -> WalkingPolicy {
        WalkingPolicy {
            speed_kmh: self.presentation.walking_speed_kmh,
            min_minutes_per_leg: self.presentation.min_walking_minutes_per_leg,
        }
    }
}

fn environment_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("transit.allowed_travel_modes")
}

//! Transit service configuration

use serde::{Deserialize, Serialize};

/// Routing preferences accepted by the Routes API
const ROUTING_PREFERENCES: [&str; 2] = ["LESS_WALKING", "FEWER_TRANSFERS"];

/// Transit modes accepted by the Routes API
const TRAVEL_MODES: [&str; 5] = ["BUS", "SUBWAY", "TRAIN", "LIGHT_RAIL", "RAIL"];

/// Configuration for the public transit service (Google Routes API)
#[derive(Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL for the Routes API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sent as `X-Goog-Api-Key`); transit is disabled without it
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Language for stop names and localized times
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Transit routing preference
    #[serde(default = "default_routing_preference")]
    pub routing_preference: String,

    /// Vehicle modes the itinerary may use
    #[serde(default = "default_allowed_travel_modes")]
    pub allowed_travel_modes: Vec<String>,

    /// Unit system for localized distances
    #[serde(default = "default_units")]
    pub units: String,
}

impl std::fmt::Debug for TransitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("language_code", &self.language_code)
            .field("routing_preference", &self.routing_preference)
            .field("allowed_travel_modes", &self.allowed_travel_modes)
            .field("units", &self.units)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://routes.googleapis.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_language_code() -> String {
    "ko".to_string()
}

fn default_routing_preference() -> String {
    "LESS_WALKING".to_string()
}

fn default_allowed_travel_modes() -> Vec<String> {
    ["BUS", "SUBWAY", "TRAIN", "LIGHT_RAIL"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_units() -> String {
    "METRIC".to_string()
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            language_code: default_language_code(),
            routing_preference: default_routing_preference(),
            allowed_travel_modes: default_allowed_travel_modes(),
            units: default_units(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Some("test-key".to_string()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Whether an API key is present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if !ROUTING_PREFERENCES.contains(&self.routing_preference.as_str()) {
            return Err(format!(
                "routing_preference must be one of {ROUTING_PREFERENCES:?}, got {}",
                self.routing_preference
            ));
        }

        if self.allowed_travel_modes.is_empty() {
            return Err("allowed_travel_modes must not be empty".to_string());
        }

        if let Some(mode) = self
            .allowed_travel_modes
            .iter()
            .find(|m| !TRAVEL_MODES.contains(&m.as_str()))
        {
            return Err(format!("unknown transit travel mode: {mode}"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransitConfig::default();
        assert_eq!(config.base_url, "https://routes.googleapis.com");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.language_code, "ko");
        assert_eq!(config.routing_preference, "LESS_WALKING");
        assert_eq!(
            config.allowed_travel_modes,
            vec!["BUS", "SUBWAY", "TRAIN", "LIGHT_RAIL"]
        );
        assert_eq!(config.units, "METRIC");
        assert!(!config.is_configured());
    }

    #[test]
    fn test_testing_config() {
        let config = TransitConfig::for_testing("http://127.0.0.1:9");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.is_configured());
    }

    #[test]
    fn test_validation_success() {
        assert!(TransitConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = TransitConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_preference() {
        let config = TransitConfig {
            routing_preference: "FASTEST".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_travel_modes() {
        let empty = TransitConfig {
            allowed_travel_modes: Vec::new(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());

        let unknown = TransitConfig {
            allowed_travel_modes: vec!["FERRY".to_string()],
            ..Default::default()
        };
        let err = unknown.validate().unwrap_err();
        assert!(err.contains("FERRY"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", TransitConfig::for_testing("http://localhost"));
        assert!(!debug.contains("test-key"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TransitConfig =
            serde_json::from_str(r#"{ "api_key": "abc", "language_code": "en" }"#).unwrap();
        assert_eq!(config.language_code, "en");
        assert_eq!(config.routing_preference, "LESS_WALKING");
        assert!(config.is_configured());
    }
}

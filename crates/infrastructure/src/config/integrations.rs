//! Routing provider settings
//!
//! API keys are held as [`SecretString`] and only exposed when building the
//! HTTP client configuration.

use integration_driving::DrivingConfig;
use integration_transit::TransitConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Driving directions settings (`[driving]`)
#[derive(Clone, Serialize, Deserialize)]
pub struct DrivingAppConfig {
    /// Base URL of the directions API
    #[serde(default = "default_driving_base_url")]
    pub base_url: String,

    /// REST API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_driving_timeout")]
    pub timeout_secs: u64,

    /// Route priority (`RECOMMEND`, `TIME`, `DISTANCE`)
    #[serde(default = "default_driving_priority")]
    pub priority: String,
}

impl std::fmt::Debug for DrivingAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrivingAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("priority", &self.priority)
            .finish()
    }
}

fn default_driving_base_url() -> String {
    DrivingConfig::default().base_url
}

fn default_driving_timeout() -> u64 {
    DrivingConfig::default().timeout_secs
}

fn default_driving_priority() -> String {
    DrivingConfig::default().priority
}

impl Default for DrivingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_driving_base_url(),
            api_key: None,
            timeout_secs: default_driving_timeout(),
            priority: default_driving_priority(),
        }
    }
}

impl DrivingAppConfig {
    /// Convert to `integration_driving::DrivingConfig`
    #[must_use]
    pub fn to_driving_config(&self) -> DrivingConfig {
        DrivingConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
            priority: self.priority.clone(),
        }
    }
}

/// Transit directions settings (`[transit]`)
#[derive(Clone, Serialize, Deserialize)]
pub struct TransitAppConfig {
    /// Base URL of the Routes API
    #[serde(default = "default_transit_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_transit_timeout")]
    pub timeout_secs: u64,

    /// Language of stop names and localized times
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// `LESS_WALKING` or `FEWER_TRANSFERS`
    #[serde(default = "default_routing_preference")]
    pub routing_preference: String,

    /// Vehicle types the itinerary may use
    #[serde(default = "default_allowed_travel_modes")]
    pub allowed_travel_modes: Vec<String>,
}

impl std::fmt::Debug for TransitAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("language_code", &self.language_code)
            .field("routing_preference", &self.routing_preference)
            .field("allowed_travel_modes", &self.allowed_travel_modes)
            .finish()
    }
}

fn default_transit_base_url() -> String {
    TransitConfig::default().base_url
}

fn default_transit_timeout() -> u64 {
    TransitConfig::default().timeout_secs
}

fn default_language_code() -> String {
    TransitConfig::default().language_code
}

fn default_routing_preference() -> String {
    TransitConfig::default().routing_preference
}

fn default_allowed_travel_modes() -> Vec<String> {
    TransitConfig::default().allowed_travel_modes
}

impl Default for TransitAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_transit_base_url(),
            api_key: None,
            timeout_secs: default_transit_timeout(),
            language_code: default_language_code(),
            routing_preference: default_routing_preference(),
            allowed_travel_modes: default_allowed_travel_modes(),
        }
    }
}

impl TransitAppConfig {
    /// Convert to `integration_transit::TransitConfig`
    #[must_use]
    pub fn to_transit_config(&self) -> TransitConfig {
        TransitConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
            language_code: self.language_code.clone(),
            routing_preference: self.routing_preference.clone(),
            allowed_travel_modes: self.allowed_travel_modes.clone(),
            ..TransitConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driving_defaults_match_client_defaults() {
        let config = DrivingAppConfig::default().to_driving_config();
        assert_eq!(config.base_url, DrivingConfig::default().base_url);
        assert_eq!(config.priority, "RECOMMEND");
        assert!(!config.is_configured());
    }

    #[test]
    fn driving_key_is_exposed_only_in_client_config() {
        let config = DrivingAppConfig {
            api_key: Some(SecretString::from("kakao-secret")),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("kakao-secret"));
        assert_eq!(
            config.to_driving_config().api_key.as_deref(),
            Some("kakao-secret")
        );
    }

    #[test]
    fn transit_key_is_redacted_and_not_serialized() {
        let config = TransitAppConfig {
            api_key: Some(SecretString::from("google-secret")),
            ..Default::default()
        };
        assert!(format!("{config:?}").contains("[REDACTED]"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("google-secret"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn transit_conversion_keeps_units() {
        let config = TransitAppConfig {
            routing_preference: "FEWER_TRANSFERS".to_string(),
            allowed_travel_modes: vec!["SUBWAY".to_string()],
            ..Default::default()
        }
        .to_transit_config();
        assert_eq!(config.routing_preference, "FEWER_TRANSFERS");
        assert_eq!(config.allowed_travel_modes, vec!["SUBWAY"]);
        assert_eq!(config.units, "METRIC");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_partial_section() {
        let config: TransitAppConfig =
            serde_json::from_str(r#"{ "api_key": "abc", "timeout_secs": 3 }"#).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.language_code, "ko");
        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("abc".to_string())
        );
    }
}

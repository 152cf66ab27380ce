//! Driving service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Kakao Mobility directions API
#[derive(Clone, Serialize, Deserialize)]
pub struct DrivingConfig {
    /// Base URL of the directions API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// REST API key (sent as `Authorization: KakaoAK <key>`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Route priority (`RECOMMEND`, `TIME`, or `DISTANCE`)
    #[serde(default = "default_priority")]
    pub priority: String,
}

impl std::fmt::Debug for DrivingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrivingConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("priority", &self.priority)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://apis-navi.kakaomobility.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_priority() -> String {
    "RECOMMEND".to_string()
}

impl Default for DrivingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            priority: default_priority(),
        }
    }
}

impl DrivingConfig {
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

        if !matches!(self.priority.as_str(), "RECOMMEND" | "TIME" | "DISTANCE") {
            return Err(format!(
                "priority must be RECOMMEND, TIME or DISTANCE, got {}",
                self.priority
            ));
        }

        Ok(())
    }
}

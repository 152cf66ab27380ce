//! Kakao Mobility directions client
//!
//! Requests a single car route and flattens its road segments into one path.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::DrivingConfig;
use crate::error::DrivingError;
use crate::models::DrivingRoute;

/// Result code the service uses for a successful search
const RESULT_OK: i32 = 0;

/// Trait for driving directions clients
#[async_trait]
pub trait DrivingClient: Send + Sync {
    /// Request a car route between two coordinates
    async fn directions(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<DrivingRoute, DrivingError>;
}

/// Directions client for the Kakao Mobility API
pub struct KakaoDrivingClient {
    client: Client,
    config: DrivingConfig,
    api_key: String,
}

impl std::fmt::Debug for KakaoDrivingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoDrivingClient")
            .field("config", &self.config)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl KakaoDrivingClient {
    /// Create a new Kakao Mobility client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be
    /// initialized.
    pub fn new(config: &DrivingConfig) -> Result<Self, DrivingError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                DrivingError::ConfigurationError("Kakao REST API key is required".to_string())
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("CareRoute/1.0")
            .build()
            .map_err(|e| DrivingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// Format a coordinate the way the API expects it (`lng,lat`)
    fn format_point(point: &Coordinate) -> String {
        format!("{},{}", point.longitude(), point.latitude())
    }

    /// Parse the raw directions JSON into a route
    fn parse_directions_response(body: &str) -> Result<DrivingRoute, DrivingError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| DrivingError::ParseError(e.to_string()))?;

        let Some(route) = raw.routes.into_iter().next() else {
            return Err(DrivingError::NoRouteFound {
                code: -1,
                message: "empty routes array".to_string(),
            });
        };

        if route.result_code != RESULT_OK {
            return Err(DrivingError::NoRouteFound {
                code: route.result_code,
                message: route.result_msg.unwrap_or_default(),
            });
        }

        if route.sections.is_empty() {
            return Err(DrivingError::NoRouteFound {
                code: route.result_code,
                message: "route has no sections".to_string(),
            });
        }

        let mut distance_m = 0;
        let mut duration_s = 0;
        let mut road_count = 0;
        let mut path = Vec::new();

        for section in route.sections {
            distance_m += section.distance;
            duration_s += section.duration;
            for road in section.roads {
                road_count += 1;
                path.extend(vertexes_to_coordinates(&road.vertexes));
            }
        }

        Ok(DrivingRoute {
            distance_m,
            duration_s,
            path,
            road_count,
        })
    }
}

/// Convert a flat `[lng, lat, lng, lat, ...]` list into coordinates
///
/// A dangling trailing value is ignored.
fn vertexes_to_coordinates(vertexes: &[f64]) -> impl Iterator<Item = Coordinate> + '_ {
    vertexes
        .chunks_exact(2)
        .map(|pair| Coordinate::new_unchecked(pair[1], pair[0]))
}

#[async_trait]
impl DrivingClient for KakaoDrivingClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn directions(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<DrivingRoute, DrivingError> {
        let url = format!("{}/v1/directions", self.config.base_url);

        let params = [
            ("origin", Self::format_point(origin)),
            ("destination", Self::format_point(destination)),
            ("priority", self.config.priority.clone()),
        ];

        debug!(?url, "Requesting driving directions");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DrivingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    DrivingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DrivingError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DrivingError::AuthenticationFailed(format!(
                "HTTP {status}: Kakao API key rejected"
            )));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DrivingError::RequestFailed(format!(
                "HTTP {status}: {error_text}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DrivingError::ParseError(e.to_string()))?;

        let route = Self::parse_directions_response(&body).inspect_err(|e| {
            warn!(error = %e, "Directions response contained no usable route");
        })?;

        debug!(
            distance_m = route.distance_m,
            duration_s = route.duration_s,
            vertices = route.path.len(),
            "Driving route found"
        );
        Ok(route)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawDirectionsResponse {
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default)]
    result_code: i32,
    result_msg: Option<String>,
    #[serde(default)]
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    #[serde(default)]
    distance: u64,
    #[serde(default)]
    duration: u64,
    #[serde(default)]
    roads: Vec<RawRoad>,
}

#[derive(Debug, Deserialize)]
struct RawRoad {
    #[serde(default)]
    vertexes: Vec<f64>,
}

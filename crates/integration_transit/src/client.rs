//! Google Routes transit client
//!
//! Requests a single transit itinerary from the `computeRoutes` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::value_objects::Coordinate;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{TransitLocation, TransitRoutesResponse};

/// Response fields requested from the API
pub const FIELD_MASK: &str = "routes.legs.steps.transitDetails,\
routes.legs.steps.polyline,\
routes.legs.steps.startLocation,\
routes.legs.steps.endLocation,\
routes.legs.steps.travelMode,\
routes.legs.steps.staticDuration,\
routes.legs.steps.distanceMeters,\
routes.legs.duration,\
routes.legs.distanceMeters";

/// Trait for transit service clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Request transit itineraries between two coordinates
    ///
    /// `departure` defaults to now. An empty route list is reported as
    /// [`TransitError::NoRoutesFound`].
    async fn compute_routes(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        departure: Option<DateTime<Utc>>,
    ) -> Result<TransitRoutesResponse, TransitError>;
}

/// Transit client backed by the Google Routes API
pub struct GoogleTransitClient {
    client: Client,
    config: TransitConfig,
    api_key: String,
}

impl std::fmt::Debug for GoogleTransitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTransitClient")
            .field("config", &self.config)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GoogleTransitClient {
    /// Create a new Routes API client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be
    /// initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                TransitError::ConfigurationError("Google Routes API key is required".to_string())
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("CareRoute/1.0")
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// Build the JSON request body
    fn build_request<'a>(
        &'a self,
        origin: &Coordinate,
        destination: &Coordinate,
        departure: DateTime<Utc>,
    ) -> ComputeRoutesRequest<'a> {
        ComputeRoutesRequest {
            origin: Waypoint {
                location: TransitLocation::from_coordinate(origin),
            },
            destination: Waypoint {
                location: TransitLocation::from_coordinate(destination),
            },
            travel_mode: "TRANSIT",
            transit_preferences: TransitPreferences {
                routing_preference: &self.config.routing_preference,
                allowed_travel_modes: &self.config.allowed_travel_modes,
            },
            departure_time: departure.to_rfc3339_opts(SecondsFormat::Secs, true),
            language_code: &self.config.language_code,
            units: &self.config.units,
        }
    }

    /// Parse the raw response body
    fn parse_routes_response(body: &str) -> Result<TransitRoutesResponse, TransitError> {
        // The API answers `{}` when nothing matches
        serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl TransitClient for GoogleTransitClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn compute_routes(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        departure: Option<DateTime<Utc>>,
    ) -> Result<TransitRoutesResponse, TransitError> {
        let url = format!("{}/directions/v2:computeRoutes", self.config.base_url);
        let request = self.build_request(origin, destination, departure.unwrap_or_else(Utc::now));

        debug!(?url, departure = %request.departure_time, "Requesting transit routes");

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == reqwest::StatusCode::BAD_REQUEST {
            let error_text = response.text().await.unwrap_or_default();
            warn!(%error_text, "Routes API rejected the request");
            return Err(TransitError::InvalidRequest(format!("HTTP {status}")));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TransitError::AuthenticationFailed(format!("HTTP {status}")));
        }

        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        let result = Self::parse_routes_response(&body)?;

        if result.primary_leg().is_none() {
            warn!("No transit routes found");
            return Err(TransitError::NoRoutesFound {
                from: origin.to_string(),
                to: destination.to_string(),
            });
        }

        debug!(count = result.routes.len(), "Transit routes found");
        Ok(result)
    }
}

// --- Request body types for serialization ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest<'a> {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: &'static str,
    transit_preferences: TransitPreferences<'a>,
    departure_time: String,
    language_code: &'a str,
    units: &'a str,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    location: TransitLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransitPreferences<'a> {
    routing_preference: &'a str,
    allowed_travel_modes: &'a [String],
}

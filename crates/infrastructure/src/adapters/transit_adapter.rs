//! Transit adapter - Implements RouteProviderPort using integration_transit
//!
//! Turns the provider's step list into walking and vehicle legs: decodes each
//! step's polyline, fills line and stop details, and estimates walking time
//! from distance where the provider reports none.

use std::sync::Arc;

use application::ports::RouteProviderPort;
use async_trait::async_trait;
use domain::geometry::{PolylineError, WalkingPolicy, WalkingTally, decode_strict, duration};
use domain::{
    Coordinate, DEFAULT_LINE_COLOR, RouteError, RouteLeg, RoutePlan, RouteQuery, RouteResult,
    TransitStop, TravelMode, VehicleInfo, VehicleMode,
};
use integration_transit::{
    GoogleTransitClient, LocalizedTime, StopPoint, TransitClient, TransitConfig, TransitDetails,
    TransitRouteLeg, TransitStep,
};
use tracing::{debug, instrument, warn};

use super::error_mapping::transit_route_error;

/// Summary used when an itinerary has no vehicle leg
const FALLBACK_SUMMARY: &str = "대중교통";

/// Stop name used when the provider omits it
const FALLBACK_STOP_NAME: &str = "정류장";

/// Route provider for public transit itineraries
pub struct TransitRouteAdapter {
    client: Result<Arc<dyn TransitClient>, String>,
    walking: WalkingPolicy,
}

impl std::fmt::Debug for TransitRouteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitRouteAdapter")
            .field("configured", &self.client.is_ok())
            .field("walking", &self.walking)
            .finish()
    }
}

impl TransitRouteAdapter {
    /// Create an adapter around an existing client
    #[must_use]
    pub fn new(client: Arc<dyn TransitClient>, walking: WalkingPolicy) -> Self {
        Self {
            client: Ok(client),
            walking,
        }
    }

    /// Create an adapter that reports every request as not configured
    #[must_use]
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            client: Err(reason.into()),
            walking: WalkingPolicy::default(),
        }
    }

    /// Build the Routes API client from configuration
    ///
    /// A missing key or a client that cannot be built yields an adapter that
    /// answers [`RouteError::NotConfigured`].
    #[must_use]
    pub fn from_config(config: &TransitConfig, walking: WalkingPolicy) -> Self {
        match GoogleTransitClient::new(config) {
            Ok(client) => Self::new(Arc::new(client), walking),
            Err(e) => {
                warn!(error = %e, "Transit directions disabled");
                Self {
                    client: Err(e.to_string()),
                    walking,
                }
            },
        }
    }
}

#[async_trait]
impl RouteProviderPort for TransitRouteAdapter {
    #[instrument(skip(self, query), fields(destination = %query.destination_label))]
    async fn fetch_route(&self, query: &RouteQuery) -> RouteResult {
        let client = self
            .client
            .as_ref()
            .map_err(|reason| RouteError::NotConfigured(reason.clone()))?;

        let response = client
            .compute_routes(&query.origin, &query.destination, None)
            .await
            .map_err(|e| {
                warn!(error = %e, "Transit directions failed");
                transit_route_error(e)
            })?;

        let leg = response
            .primary_leg()
            .ok_or_else(|| RouteError::NoRouteFound("response contained no legs".to_string()))?;

        normalize_itinerary(leg, &self.walking)
    }

    fn mode(&self) -> TravelMode {
        TravelMode::Transit
    }
}

/// Convert a provider leg into a route plan
///
/// # Errors
///
/// Returns [`RouteError::NoRouteFound`] when the leg yields neither a walking
/// nor a vehicle leg.
pub fn normalize_itinerary(leg: &TransitRouteLeg, walking: &WalkingPolicy) -> RouteResult {
    let mut legs = Vec::with_capacity(leg.steps.len());
    let mut tally = WalkingTally::new();

    for (index, step) in leg.steps.iter().enumerate() {
        if step.is_walk() {
            tally_walk(step, walking, &mut tally);
            legs.push(RouteLeg::walk(step_geometry(index, step)));
        } else if let Some(details) = &step.transit_details {
            legs.push(RouteLeg::transit(
                step_geometry(index, step),
                vehicle_info(details),
            ));
        } else {
            debug!(index, mode = ?step.travel_mode, "Skipping step without transit details");
        }
    }

    if legs.is_empty() {
        return Err(RouteError::NoRouteFound(
            "itinerary has no usable steps".to_string(),
        ));
    }

    let (walking_minutes, is_estimated) = tally.finish(walking);
    let vehicle_count = legs.iter().filter(|l| l.vehicle_info.is_some()).count();
    let transfer_count = u32::try_from(vehicle_count.saturating_sub(1)).unwrap_or(u32::MAX);

    let fragments: Vec<String> = legs
        .iter()
        .filter_map(|l| l.vehicle_info.as_ref())
        .map(VehicleInfo::summary_fragment)
        .collect();
    let summary = if fragments.is_empty() {
        FALLBACK_SUMMARY.to_string()
    } else {
        fragments.join(" → ")
    };

    let duration_min = leg.duration.as_ref().map_or(0, duration::to_minutes);
    let distance_m = leg
        .distance_meters
        .unwrap_or_else(|| leg.steps.iter().filter_map(|s| s.distance_meters).sum());

    debug!(
        legs = legs.len(),
        duration_min,
        walking_minutes,
        transfer_count,
        is_estimated,
        "Transit itinerary normalized"
    );

    #[allow(clippy::cast_precision_loss)]
    let distance_km = distance_m as f64 / 1000.0;

    Ok(RoutePlan {
        distance_km,
        duration_min,
        legs,
        transfer_count,
        walking_minutes,
        is_estimated,
        summary: Some(summary),
    })
}

/// Add one walking step to the tally
///
/// A positive `staticDuration` wins over the distance estimate.
fn tally_walk(step: &TransitStep, walking: &WalkingPolicy, tally: &mut WalkingTally) {
    let reported = step
        .static_duration
        .as_ref()
        .map_or(0, duration::to_minutes);
    if reported > 0 {
        tally.add_reported(reported);
    } else if let Some((start, end)) = step.endpoints() {
        tally.add_estimated(walking.minutes_between(&start, &end));
    } else {
        tally.add_unknown();
    }
}

/// Decode a step's geometry, keeping the valid prefix of a damaged polyline
///
/// Walking steps without a polyline fall back to their endpoints.
fn step_geometry(index: usize, step: &TransitStep) -> Vec<Coordinate> {
    let encoded = step.encoded_polyline();
    if encoded.is_empty() {
        return step
            .endpoints()
            .map(|(start, end)| vec![start, end])
            .unwrap_or_default();
    }

    decode_strict(encoded).unwrap_or_else(|e: PolylineError| {
        warn!(
            index,
            offset = e.offset(),
            decoded = e.decoded().len(),
            error = %e,
            "Damaged step polyline, keeping decoded prefix"
        );
        e.into_decoded()
    })
}

/// Build vehicle details, falling back to generic labels
fn vehicle_info(details: &TransitDetails) -> VehicleInfo {
    let line = details.transit_line.as_ref();
    let mode = line
        .and_then(|l| l.vehicle_type())
        .map_or(VehicleMode::Other, VehicleMode::from_provider_type);
    let text = |value: Option<&String>| value.cloned().unwrap_or_default();

    let stops = details.stop_details.as_ref();
    let times = details.localized_values.as_ref();

    VehicleInfo {
        mode,
        line_name: text(line.and_then(|l| l.name.as_ref())),
        line_short_name: text(line.and_then(|l| l.name_short.as_ref())),
        line_color: line
            .and_then(|l| l.color.as_deref())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_LINE_COLOR)
            .to_string(),
        departure_stop: transit_stop(stops.and_then(|s| s.departure_stop.as_ref())),
        arrival_stop: transit_stop(stops.and_then(|s| s.arrival_stop.as_ref())),
        departure_time: localized(times.and_then(|t| t.departure_time.as_ref())),
        arrival_time: localized(times.and_then(|t| t.arrival_time.as_ref())),
        stop_count: details.stop_count.unwrap_or(0),
    }
}

fn transit_stop(stop: Option<&StopPoint>) -> TransitStop {
    let name = stop
        .and_then(|s| s.name.as_deref())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(FALLBACK_STOP_NAME);
    let location = stop
        .and_then(|s| s.location.as_ref())
        .and_then(|l| l.coordinate());
    TransitStop::new(name, location)
}

fn localized(time: Option<&LocalizedTime>) -> Option<String> {
    time.and_then(LocalizedTime::text)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

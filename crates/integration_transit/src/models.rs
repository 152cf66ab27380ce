//! Transit data models
//!
//! Typed representations of the `computeRoutes` response, restricted to the
//! fields requested through the field mask. Every field is optional because
//! the API omits empty values.

use domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};

/// Step travel mode used by the API for walking steps
const WALK_MODE: &str = "WALK";

/// Top-level `computeRoutes` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRoutesResponse {
    /// Route alternatives; the first one is the recommended itinerary
    #[serde(default)]
    pub routes: Vec<TransitRoute>,
}

impl TransitRoutesResponse {
    /// First leg of the first route, if any
    #[must_use]
    pub fn primary_leg(&self) -> Option<&TransitRouteLeg> {
        self.routes.first().and_then(|r| r.legs.first())
    }
}

/// A single itinerary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRoute {
    /// Legs between waypoints (exactly one without intermediate waypoints)
    #[serde(default)]
    pub legs: Vec<TransitRouteLeg>,
}

/// One origin-to-destination leg made of ordered steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRouteLeg {
    /// Total leg duration, usually a `"<n>s"` string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<serde_json::Value>,
    /// Total leg distance in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u64>,
    /// Ordered steps
    #[serde(default)]
    pub steps: Vec<TransitStep>,
}

/// A walking or vehicle step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitStep {
    /// `WALK` or `TRANSIT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_mode: Option<String>,
    /// Encoded step geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<EncodedPolyline>,
    /// Step start point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<TransitLocation>,
    /// Step end point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<TransitLocation>,
    /// Step duration without traffic, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_duration: Option<serde_json::Value>,
    /// Step distance in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u64>,
    /// Present on vehicle steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_details: Option<TransitDetails>,
}

impl TransitStep {
    /// Whether the step is a walking step
    #[must_use]
    pub fn is_walk(&self) -> bool {
        self.travel_mode.as_deref() == Some(WALK_MODE)
    }

    /// Encoded geometry, empty when absent
    #[must_use]
    pub fn encoded_polyline(&self) -> &str {
        self.polyline
            .as_ref()
            .and_then(|p| p.encoded_polyline.as_deref())
            .unwrap_or_default()
    }

    /// Start and end coordinates when both are reported
    #[must_use]
    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        let start = self.start_location.as_ref()?.coordinate()?;
        let end = self.end_location.as_ref()?.coordinate()?;
        Some((start, end))
    }
}

/// Encoded polyline wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedPolyline {
    /// Polyline-encoded coordinate sequence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_polyline: Option<String>,
}

/// Location wrapper (`{ "latLng": { ... } }`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitLocation {
    /// Geographic position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_lng: Option<LatLng>,
}

impl TransitLocation {
    /// Build a location from a coordinate
    #[must_use]
    pub const fn from_coordinate(coordinate: &Coordinate) -> Self {
        Self {
            lat_lng: Some(LatLng {
                latitude: coordinate.latitude(),
                longitude: coordinate.longitude(),
            }),
        }
    }

    /// The position as a validated coordinate
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.lat_lng
            .as_ref()
            .and_then(|ll| Coordinate::new(ll.latitude, ll.longitude).ok())
    }
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: f64,
}

/// Vehicle-specific information of a transit step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitDetails {
    /// Boarding and alighting stops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_details: Option<StopDetails>,
    /// Human readable departure/arrival times
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_values: Option<LocalizedValues>,
    /// Line being ridden
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_line: Option<TransitLine>,
    /// Number of stops from departure to arrival
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_count: Option<u32>,
    /// Direction shown on the vehicle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
}

/// Boarding and alighting stops
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDetails {
    /// Where the rider boards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_stop: Option<StopPoint>,
    /// Where the rider alights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_stop: Option<StopPoint>,
}

/// A transit stop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPoint {
    /// Stop name in the requested language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stop position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<TransitLocation>,
}

/// Localized departure and arrival times
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedValues {
    /// Departure time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<LocalizedTime>,
    /// Arrival time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<LocalizedTime>,
}

/// Localized time (`{ "time": { "text": "오후 2:05" } }`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedTime {
    /// Formatted time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<LocalizedText>,
}

impl LocalizedTime {
    /// The formatted time text, if reported
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.time.as_ref().and_then(|t| t.text.as_deref())
    }
}

/// Localized text value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    /// Text in the requested language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Transit line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitLine {
    /// Full line name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short line name such as `2호선` or `472`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_short: Option<String>,
    /// Line colour as `#rrggbb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Vehicle operating the line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<TransitVehicle>,
}

impl TransitLine {
    /// Vehicle type such as `SUBWAY` or `BUS`
    #[must_use]
    pub fn vehicle_type(&self) -> Option<&str> {
        self.vehicle.as_ref().and_then(|v| v.vehicle_type.as_deref())
    }
}

/// Vehicle operating a line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitVehicle {
    /// Vehicle type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    /// Localized vehicle name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<VehicleName>,
}

/// Localized vehicle name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleName {
    /// Name text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

//! Route model shared by the driving and transit providers
//!
//! Both providers normalize their responses into a [`RoutePlan`]. Failures are
//! carried as a [`RouteError`] value, so a failed result can never hold legs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::Coordinate;

/// Fallback line colour when the provider does not report one
pub const DEFAULT_LINE_COLOR: &str = "#4CAF50";

/// Which of the two routing modes is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Driving directions
    #[default]
    Car,
    /// Public transit directions
    Transit,
}

impl TravelMode {
    /// Localized label used in user-facing messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Car => "자동차",
            Self::Transit => "대중교통",
        }
    }

    /// Emoji used in status lines
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Car => "🚗",
            Self::Transit => "🚌",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Car => write!(f, "car"),
            Self::Transit => write!(f, "transit"),
        }
    }
}

/// How a single leg is travelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelKind {
    /// On foot
    Walk,
    /// Riding something (a car for driving routes, a transit vehicle otherwise)
    Vehicle,
}

/// Transit vehicle classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleMode {
    /// Any kind of bus
    Bus,
    /// Subway / metro
    Subway,
    /// Heavy rail
    Train,
    /// Tram, light rail, ferry, or anything unrecognized
    Other,
}

impl VehicleMode {
    /// Map a provider vehicle type (e.g. `"SUBWAY"`, `"INTERCITY_BUS"`) to a mode
    #[must_use]
    pub fn from_provider_type(vehicle_type: &str) -> Self {
        match vehicle_type {
            "SUBWAY" | "METRO_RAIL" => Self::Subway,
            "BUS" | "INTERCITY_BUS" | "TROLLEYBUS" | "SHARE_TAXI" => Self::Bus,
            "RAIL" | "TRAIN" | "HEAVY_RAIL" | "COMMUTER_TRAIN" | "HIGH_SPEED_TRAIN"
            | "LONG_DISTANCE_TRAIN" => Self::Train,
            _ => Self::Other,
        }
    }

    /// Localized mode name used in itinerary summaries
    #[must_use]
    pub const fn localized_name(&self) -> &'static str {
        match self {
            Self::Subway => "지하철",
            Self::Bus => "버스",
            Self::Train => "기차",
            Self::Other => "대중교통",
        }
    }

    /// Emoji representation for info bubbles
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Subway => "🚇",
            Self::Bus => "🚌",
            Self::Train => "🚂",
            Self::Other => "🚊",
        }
    }
}

impl fmt::Display for VehicleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.localized_name())
    }
}

/// A boarding or alighting stop
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransitStop {
    /// Stop name as reported by the provider (may be empty)
    pub name: String,
    /// Stop position, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
}

impl TransitStop {
    /// Create a stop
    #[must_use]
    pub fn new(name: impl Into<String>, location: Option<Coordinate>) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// Line and stop details of a transit vehicle leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    /// Vehicle classification
    pub mode: VehicleMode,
    /// Full line name (e.g. "수도권 2호선")
    pub line_name: String,
    /// Short line name (e.g. "2호선", "146")
    pub line_short_name: String,
    /// Line colour as a CSS hex string
    pub line_color: String,
    /// Where to board
    pub departure_stop: TransitStop,
    /// Where to get off
    pub arrival_stop: TransitStop,
    /// Localized departure time text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    /// Localized arrival time text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    /// Number of stops travelled
    pub stop_count: u32,
}

impl VehicleInfo {
    /// The line name to show to the user, preferring the short form
    #[must_use]
    pub fn display_line_name(&self) -> &str {
        if self.line_short_name.is_empty() {
            &self.line_name
        } else {
            &self.line_short_name
        }
    }

    /// One summary fragment, e.g. `"지하철 2호선"`
    #[must_use]
    pub fn summary_fragment(&self) -> String {
        let line = self.display_line_name();
        if line.is_empty() {
            self.mode.localized_name().to_string()
        } else {
            format!("{} {line}", self.mode.localized_name())
        }
    }
}

/// One contiguous segment of a route travelled in a single way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Walking or riding
    pub travel_kind: TravelKind,
    /// Ordered path of the leg
    pub geometry: Vec<Coordinate>,
    /// Transit details (only for transit vehicle legs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_info: Option<VehicleInfo>,
}

impl RouteLeg {
    /// A walking leg
    #[must_use]
    pub const fn walk(geometry: Vec<Coordinate>) -> Self {
        Self {
            travel_kind: TravelKind::Walk,
            geometry,
            vehicle_info: None,
        }
    }

    /// A transit vehicle leg
    #[must_use]
    pub const fn transit(geometry: Vec<Coordinate>, info: VehicleInfo) -> Self {
        Self {
            travel_kind: TravelKind::Vehicle,
            geometry,
            vehicle_info: Some(info),
        }
    }

    /// A driving leg (vehicle travel without transit details)
    #[must_use]
    pub const fn driving(geometry: Vec<Coordinate>) -> Self {
        Self {
            travel_kind: TravelKind::Vehicle,
            geometry,
            vehicle_info: None,
        }
    }

    /// Whether this leg is walked
    #[must_use]
    pub fn is_walk(&self) -> bool {
        self.travel_kind == TravelKind::Walk
    }
}

/// A successfully computed route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Total distance in kilometers
    pub distance_km: f64,
    /// Total travel time in whole minutes
    pub duration_min: u32,
    /// Ordered legs
    pub legs: Vec<RouteLeg>,
    /// Vehicle changes (transit only)
    pub transfer_count: u32,
    /// Minutes spent walking (transit only)
    pub walking_minutes: u32,
    /// Whether any figure was derived rather than reported by the provider
    pub is_estimated: bool,
    /// One-line itinerary summary (transit only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RoutePlan {
    /// A single-leg driving plan
    #[must_use]
    pub fn driving(distance_km: f64, duration_min: u32, geometry: Vec<Coordinate>) -> Self {
        Self {
            distance_km: distance_km.max(0.0),
            duration_min,
            legs: vec![RouteLeg::driving(geometry)],
            transfer_count: 0,
            walking_minutes: 0,
            is_estimated: false,
            summary: None,
        }
    }

    /// Legs ridden in a transit vehicle
    pub fn vehicle_legs(&self) -> impl Iterator<Item = (&RouteLeg, &VehicleInfo)> {
        self.legs
            .iter()
            .filter_map(|leg| leg.vehicle_info.as_ref().map(|info| (leg, info)))
    }

    /// Legs walked
    pub fn walking_legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.legs.iter().filter(|leg| leg.is_walk())
    }

    /// Every coordinate of every leg, in order
    #[must_use]
    pub fn all_coordinates(&self) -> Vec<Coordinate> {
        self.legs
            .iter()
            .flat_map(|leg| leg.geometry.iter().copied())
            .collect()
    }
}

/// Why a provider could not produce a route
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RouteError {
    /// Provider credential or endpoint missing
    #[error("Routing provider not configured: {0}")]
    NotConfigured(String),

    /// Transport failure, non-2xx, or malformed response
    #[error("Upstream routing error: {0}")]
    Upstream(String),

    /// Valid response without any route
    #[error("No route found: {0}")]
    NoRouteFound(String),
}

impl RouteError {
    /// Returns true if reselecting the destination may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    /// User-facing failure message for a given mode
    #[must_use]
    pub fn user_message(&self, mode: TravelMode) -> String {
        let label = mode.label();
        match self {
            Self::NotConfigured(_) => format!("{label} 길찾기를 사용할 수 없습니다 (설정 필요)"),
            Self::Upstream(_) => {
                format!("{label} 경로 검색에 실패했습니다. 병원을 다시 선택해 주세요.")
            },
            Self::NoRouteFound(_) => format!("{label} 경로를 찾을 수 없습니다."),
        }
    }
}

/// Outcome of one provider for one query
pub type RouteResult = Result<RoutePlan, RouteError>;

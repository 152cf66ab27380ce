//! Visual artifacts of a route
//!
//! Polyline styles, stop markers and info bubble markup for the routes the
//! presentation service draws. Everything here is pure; the service hands the
//! results to the drawing surface.

use std::fmt::Write;

use domain::{Coordinate, DEFAULT_LINE_COLOR, RouteLeg, RoutePlan, VehicleInfo};

use crate::ports::{MarkerIcon, PolylineStyle, StrokeDash};

/// Colour of the driving route
pub const DRIVING_COLOR: &str = "#007bff";

/// Colour of walking legs
pub const WALKING_COLOR: &str = "#FF6B35";

/// Colour of boarding stop markers
pub const BOARDING_COLOR: &str = "#4CAF50";

/// Colour of alighting stop markers
pub const ALIGHTING_COLOR: &str = "#f44336";

/// Opacity shared by all route polylines
pub const ROUTE_OPACITY: f32 = 0.8;

const STOP_MARKER_SIZE: u32 = 28;

/// Style of the driving polyline
#[must_use]
pub fn driving_style() -> PolylineStyle {
    PolylineStyle {
        color: DRIVING_COLOR.to_string(),
        width: 6,
        dash: StrokeDash::Solid,
        opacity: ROUTE_OPACITY,
    }
}

/// Style of a walking leg
#[must_use]
pub fn walking_style() -> PolylineStyle {
    PolylineStyle {
        color: WALKING_COLOR.to_string(),
        width: 4,
        dash: StrokeDash::ShortDot,
        opacity: ROUTE_OPACITY,
    }
}

/// Style of a transit vehicle leg drawn in its line colour
#[must_use]
pub fn vehicle_style(line_color: &str) -> PolylineStyle {
    PolylineStyle {
        color: sanitize_color(line_color).to_string(),
        width: 5,
        dash: StrokeDash::Solid,
        opacity: ROUTE_OPACITY,
    }
}

/// Style for any leg of a plan
#[must_use]
pub fn leg_style(leg: &RouteLeg) -> PolylineStyle {
    if leg.is_walk() {
        return walking_style();
    }
    leg.vehicle_info
        .as_ref()
        .map_or_else(driving_style, |info| vehicle_style(&info.line_color))
}

/// `#rgb` or `#rrggbb`, otherwise the default line colour
fn sanitize_color(color: &str) -> &str {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid { color } else { DEFAULT_LINE_COLOR }
}

/// Whether a stop marker is where the rider gets on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopRole {
    /// Departure stop of a vehicle leg
    Boarding,
    /// Arrival stop of a vehicle leg
    Alighting,
}

impl StopRole {
    /// Short label drawn on the marker
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Boarding => "승차",
            Self::Alighting => "하차",
        }
    }

    /// Marker icon for the role
    #[must_use]
    pub fn icon(&self) -> MarkerIcon {
        let color = match self {
            Self::Boarding => BOARDING_COLOR,
            Self::Alighting => ALIGHTING_COLOR,
        };
        MarkerIcon {
            color: color.to_string(),
            size: STOP_MARKER_SIZE,
            label: self.label().to_string(),
        }
    }

    const fn background(&self) -> &'static str {
        match self {
            Self::Boarding => "#e8f5e8",
            Self::Alighting => "#ffebee",
        }
    }
}

/// A stop marker ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct StopMarkerSpec {
    /// Where the marker goes
    pub position: Coordinate,
    /// Hover title (stop name)
    pub title: String,
    /// Boarding or alighting
    pub role: StopRole,
    /// Info bubble markup
    pub bubble_html: String,
}

/// Boarding and alighting markers of every vehicle leg, in travel order
///
/// Stops without a reported position get no marker.
#[must_use]
pub fn stop_markers(plan: &RoutePlan) -> Vec<StopMarkerSpec> {
    let mut markers = Vec::new();
    for (_, info) in plan.vehicle_legs() {
        for (role, stop) in [
            (StopRole::Boarding, &info.departure_stop),
            (StopRole::Alighting, &info.arrival_stop),
        ] {
            if let Some(position) = stop.location {
                markers.push(StopMarkerSpec {
                    position,
                    title: stop.name.clone(),
                    role,
                    bubble_html: stop_bubble_html(info, role),
                });
            }
        }
    }
    markers
}

/// Info bubble markup for a stop of a vehicle leg
#[must_use]
pub fn stop_bubble_html(info: &VehicleInfo, role: StopRole) -> String {
    let line_name = if info.line_name.is_empty() {
        &info.line_short_name
    } else {
        &info.line_name
    };
    let (stop, time) = match role {
        StopRole::Boarding => (&info.departure_stop, info.departure_time.as_deref()),
        StopRole::Alighting => (&info.arrival_stop, info.arrival_time.as_deref()),
    };
    let (marker_text, time_label, hint) = match role {
        StopRole::Boarding => ("🟢 승차 지점", "출발", "여기서 탑승하세요!"),
        StopRole::Alighting => ("🔴 하차 지점", "도착", "여기서 하차하세요!"),
    };
    let hint_color = role.icon().color;

    let mut html = String::from(
        r#"<div style="padding: 12px; min-width: 220px; font-size: 13px;">"#,
    );
    let _ = write!(
        html,
        r#"<div style="font-weight: bold; margin-bottom: 8px;">{} <span style="color: {};">{}</span></div>"#,
        info.mode.emoji(),
        sanitize_color(&info.line_color),
        escape_html(line_name),
    );
    let _ = write!(
        html,
        r#"<div style="margin-bottom: 6px; padding: 4px 8px; background-color: {};"><strong>{marker_text}:</strong> {}</div>"#,
        role.background(),
        escape_html(&stop.name),
    );
    if let Some(time) = time.filter(|t| !t.is_empty()) {
        let _ = write!(
            html,
            r#"<div style="color: #666;">⏰ {time_label}: {}</div>"#,
            escape_html(time)
        );
    }
    if info.stop_count > 0 {
        let _ = write!(
            html,
            r#"<div style="color: #666; font-size: 12px;">🚏 총 {}개 정거장 이동</div>"#,
            info.stop_count
        );
    }
    let _ = write!(
        html,
        r#"<div style="color: {hint_color}; font-size: 12px;">💡 {hint}</div></div>"#
    );
    html
}

/// Escape text for inclusion in HTML content or attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

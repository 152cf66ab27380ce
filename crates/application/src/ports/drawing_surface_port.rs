//! Drawing surface port
//!
//! The map the routes are drawn on, reduced to the primitives the
//! presentation service needs. Artifacts are created detached and only appear
//! once made visible.

use std::fmt;

use domain::Coordinate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Handle to a polyline owned by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolylineHandle(pub u64);

/// Handle to a marker owned by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

impl fmt::Display for PolylineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polyline#{}", self.0)
    }
}

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Stroke pattern of a polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeDash {
    /// Continuous line
    #[default]
    Solid,
    /// Short dots, used for walking
    ShortDot,
}

/// Visual style of a polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineStyle {
    /// CSS hex colour
    pub color: String,
    /// Stroke width in pixels
    pub width: u32,
    /// Stroke pattern
    pub dash: StrokeDash,
    /// Stroke opacity between 0 and 1
    pub opacity: f32,
}

/// Icon of a marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerIcon {
    /// CSS hex fill colour
    pub color: String,
    /// Diameter in pixels
    pub size: u32,
    /// Short text drawn inside the icon
    pub label: String,
}

/// Port for the map drawing surface
#[cfg_attr(test, automock)]
pub trait DrawingSurfacePort: Send + Sync {
    /// Create a hidden polyline
    fn create_polyline(&self, path: &[Coordinate], style: &PolylineStyle) -> PolylineHandle;

    /// Attach or detach a polyline
    fn set_polyline_visible(&self, handle: PolylineHandle, visible: bool);

    /// Remove a polyline for good
    fn destroy_polyline(&self, handle: PolylineHandle);

    /// Create a hidden marker
    fn create_marker(&self, position: Coordinate, title: &str, icon: &MarkerIcon)
    -> MarkerHandle;

    /// Attach or detach a marker
    fn set_marker_visible(&self, handle: MarkerHandle, visible: bool);

    /// Remove a marker for good
    fn destroy_marker(&self, handle: MarkerHandle);

    /// Open an info bubble anchored on a marker
    fn open_info_bubble(&self, anchor: MarkerHandle, html: &str);

    /// Close the info bubble anchored on a marker, if open
    fn close_info_bubble(&self, anchor: MarkerHandle);

    /// Fit the viewport to the coordinates
    fn fit_bounds(&self, coordinates: &[Coordinate]);
}

//! In-memory drawing surface
//!
//! Keeps every polyline and marker the presentation service creates, logs each
//! call, and exposes a snapshot of what a map would currently show. Used by the
//! CLI in place of a browser map.

use std::collections::{BTreeMap, BTreeSet};

use application::ports::{
    DrawingSurfacePort, MarkerHandle, MarkerIcon, PolylineHandle, PolylineStyle,
};
use domain::Coordinate;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// A polyline as last drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineView {
    /// Handle assigned at creation
    pub handle: PolylineHandle,
    /// Vertex count
    pub points: usize,
    /// Stroke style
    pub style: PolylineStyle,
    /// Whether the polyline is shown
    pub visible: bool,
}

/// A marker as last drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    /// Handle assigned at creation
    pub handle: MarkerHandle,
    /// Marker position
    pub position: Coordinate,
    /// Hover title
    pub title: String,
    /// Marker icon
    pub icon: MarkerIcon,
    /// Whether the marker is shown
    pub visible: bool,
    /// Content of the open info bubble, if any
    pub bubble: Option<String>,
}

/// Everything currently held by the surface, ordered by handle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SurfaceSnapshot {
    /// Live polylines
    pub polylines: Vec<PolylineView>,
    /// Live markers
    pub markers: Vec<MarkerView>,
    /// Markers with an open bubble
    pub open_bubbles: usize,
    /// Coordinates passed to the last `fit_bounds` call
    pub last_bounds: Option<(Coordinate, Coordinate)>,
}

impl SurfaceSnapshot {
    /// Visible polylines
    pub fn visible_polylines(&self) -> impl Iterator<Item = &PolylineView> {
        self.polylines.iter().filter(|p| p.visible)
    }

    /// Visible markers
    pub fn visible_markers(&self) -> impl Iterator<Item = &MarkerView> {
        self.markers.iter().filter(|m| m.visible)
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_handle: u64,
    polylines: BTreeMap<u64, PolylineView>,
    markers: BTreeMap<u64, MarkerView>,
    bubbles: BTreeSet<u64>,
    last_bounds: Option<(Coordinate, Coordinate)>,
}

impl SurfaceState {
    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

/// Drawing surface that records state in memory and logs every call
#[derive(Debug, Default)]
pub struct TracingDrawingSurface {
    state: Mutex<SurfaceState>,
}

impl TracingDrawingSurface {
    /// Create an empty surface
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current surface contents
    #[must_use]
    pub fn snapshot(&self) -> SurfaceSnapshot {
        let state = self.state.lock();
        SurfaceSnapshot {
            polylines: state.polylines.values().cloned().collect(),
            markers: state.markers.values().cloned().collect(),
            open_bubbles: state.bubbles.len(),
            last_bounds: state.last_bounds,
        }
    }
}

/// South-west and north-east corners of a coordinate set
fn bounding_box(coordinates: &[Coordinate]) -> Option<(Coordinate, Coordinate)> {
    let first = coordinates.first()?;
    let (mut south, mut west) = (first.latitude(), first.longitude());
    let (mut north, mut east) = (south, west);
    for c in &coordinates[1..] {
        south = south.min(c.latitude());
        north = north.max(c.latitude());
        west = west.min(c.longitude());
        east = east.max(c.longitude());
    }
    Some((
        Coordinate::new_unchecked(south, west),
        Coordinate::new_unchecked(north, east),
    ))
}

impl DrawingSurfacePort for TracingDrawingSurface {
    fn create_polyline(&self, path: &[Coordinate], style: &PolylineStyle) -> PolylineHandle {
        let mut state = self.state.lock();
        let handle = PolylineHandle(state.allocate());
        debug!(%handle, points = path.len(), color = %style.color, "Polyline created");
        state.polylines.insert(
            handle.0,
            PolylineView {
                handle,
                points: path.len(),
                style: style.clone(),
                visible: false,
            },
        );
        handle
    }

    fn set_polyline_visible(&self, handle: PolylineHandle, visible: bool) {
        match self.state.lock().polylines.get_mut(&handle.0) {
            Some(view) => {
                trace!(%handle, visible, "Polyline visibility");
                view.visible = visible;
            },
            None => warn!(%handle, "Visibility change for unknown polyline"),
        }
    }

    fn destroy_polyline(&self, handle: PolylineHandle) {
        if self.state.lock().polylines.remove(&handle.0).is_some() {
            debug!(%handle, "Polyline destroyed");
        }
    }

    fn create_marker(&self, position: Coordinate, title: &str, icon: &MarkerIcon) -> MarkerHandle {
        let mut state = self.state.lock();
        let handle = MarkerHandle(state.allocate());
        debug!(%handle, title, label = %icon.label, "Marker created");
        state.markers.insert(
            handle.0,
            MarkerView {
                handle,
                position,
                title: title.to_string(),
                icon: icon.clone(),
                visible: false,
                bubble: None,
            },
        );
        handle
    }

    fn set_marker_visible(&self, handle: MarkerHandle, visible: bool) {
        match self.state.lock().markers.get_mut(&handle.0) {
            Some(view) => {
                trace!(%handle, visible, "Marker visibility");
                view.visible = visible;
            },
            None => warn!(%handle, "Visibility change for unknown marker"),
        }
    }

    fn destroy_marker(&self, handle: MarkerHandle) {
        let mut state = self.state.lock();
        state.bubbles.remove(&handle.0);
        if state.markers.remove(&handle.0).is_some() {
            debug!(%handle, "Marker destroyed");
        }
    }

    fn open_info_bubble(&self, anchor: MarkerHandle, html: &str) {
        let mut state = self.state.lock();
        let Some(view) = state.markers.get_mut(&anchor.0) else {
            warn!(%anchor, "Bubble for unknown marker");
            return;
        };
        view.bubble = Some(html.to_string());
        state.bubbles.insert(anchor.0);
        debug!(%anchor, "Info bubble opened");
    }

    fn close_info_bubble(&self, anchor: MarkerHandle) {
        let mut state = self.state.lock();
        if let Some(view) = state.markers.get_mut(&anchor.0) {
            view.bubble = None;
        }
        if state.bubbles.remove(&anchor.0) {
            trace!(%anchor, "Info bubble closed");
        }
    }

    fn fit_bounds(&self, coordinates: &[Coordinate]) {
        let bounds = bounding_box(coordinates);
        if let Some((sw, ne)) = bounds {
            debug!(
                south = sw.latitude(),
                west = sw.longitude(),
                north = ne.latitude(),
                east = ne.longitude(),
                "Viewport fitted"
            );
            self.state.lock().last_bounds = bounds;
        }
    }
}

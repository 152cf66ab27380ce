//! Route presentation service
//!
//! Drives both route providers for a hospital selection and owns what is
//! drawn on the map. The driving route is awaited and shown; the transit
//! route is fetched in the background after a short delay and kept hidden
//! until the user switches to it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{Coordinate, RoutePlan, RouteQuery, RouteResult, TravelMode};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DrawingSurfacePort, MarkerHandle, PolylineHandle, RouteProviderPort};
use crate::services::route_artifacts::{leg_style, stop_markers};
use crate::services::route_selection::{RouteSelectionState, SelectionId};

/// Default delay before the transit fetch starts
const DEFAULT_TRANSIT_DELAY_MS: u64 = 100;

/// Upper bound accepted for the transit delay
const MAX_TRANSIT_DELAY_MS: u64 = 10_000;

/// Configuration of the presentation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Delay between the driving request and the transit request
    #[serde(default = "default_transit_delay_ms")]
    pub transit_delay_ms: u64,
}

const fn default_transit_delay_ms() -> u64 {
    DEFAULT_TRANSIT_DELAY_MS
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            transit_delay_ms: default_transit_delay_ms(),
        }
    }
}

impl PresentationConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            transit_delay_ms: 0,
        }
    }

    /// Delay before the transit fetch
    #[must_use]
    pub const fn transit_delay(&self) -> Duration {
        Duration::from_millis(self.transit_delay_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the delay is unreasonably long.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.transit_delay_ms > MAX_TRANSIT_DELAY_MS {
            return Err(ApplicationError::Configuration(format!(
                "transit_delay_ms must be at most {MAX_TRANSIT_DELAY_MS}"
            )));
        }
        Ok(())
    }
}

/// How a background transit fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitOutcome {
    /// The result was stored in the current selection
    Applied,
    /// The selection changed first; the result was dropped
    Stale,
    /// The task was aborted or panicked
    Cancelled,
}

/// Handle to the background transit fetch of one selection
///
/// Dropping it leaves the fetch running.
#[derive(Debug)]
pub struct PendingTransit {
    selection: SelectionId,
    handle: JoinHandle<TransitOutcome>,
}

impl PendingTransit {
    /// Selection the fetch belongs to
    #[must_use]
    pub const fn selection(&self) -> SelectionId {
        self.selection
    }

    /// Wait for the fetch to complete
    pub async fn wait(self) -> TransitOutcome {
        let selection = self.selection;
        self.handle.await.unwrap_or_else(|e| {
            warn!(%selection, error = %e, "Transit task did not complete");
            TransitOutcome::Cancelled
        })
    }
}

/// A stop marker on the surface
#[derive(Debug)]
struct DrawnMarker {
    handle: MarkerHandle,
    bubble_html: String,
}

/// Everything drawn for one mode
#[derive(Debug, Default)]
struct DrawnRoute {
    polylines: Vec<PolylineHandle>,
    markers: Vec<DrawnMarker>,
    bounds: Vec<Coordinate>,
}

impl DrawnRoute {
    /// Create the artifacts of a plan, hidden
    fn draw(surface: &dyn DrawingSurfacePort, plan: &RoutePlan) -> Self {
        let polylines = plan
            .legs
            .iter()
            .filter(|leg| !leg.geometry.is_empty())
            .map(|leg| surface.create_polyline(&leg.geometry, &leg_style(leg)))
            .collect();

        let markers = stop_markers(plan)
            .into_iter()
            .map(|spec| DrawnMarker {
                handle: surface.create_marker(spec.position, &spec.title, &spec.role.icon()),
                bubble_html: spec.bubble_html,
            })
            .collect();

        Self {
            polylines,
            markers,
            bounds: plan.all_coordinates(),
        }
    }

    fn show(&self, surface: &dyn DrawingSurfacePort) {
        self.set_visible(surface, true);
        if !self.bounds.is_empty() {
            surface.fit_bounds(&self.bounds);
        }
    }

    fn hide(&self, surface: &dyn DrawingSurfacePort) {
        self.close_bubbles(surface);
        self.set_visible(surface, false);
    }

    fn set_visible(&self, surface: &dyn DrawingSurfacePort, visible: bool) {
        for polyline in &self.polylines {
            surface.set_polyline_visible(*polyline, visible);
        }
        for marker in &self.markers {
            surface.set_marker_visible(marker.handle, visible);
        }
    }

    fn close_bubbles(&self, surface: &dyn DrawingSurfacePort) {
        for marker in &self.markers {
            surface.close_info_bubble(marker.handle);
        }
    }

    fn destroy(self, surface: &dyn DrawingSurfacePort) {
        self.close_bubbles(surface);
        for marker in self.markers {
            surface.destroy_marker(marker.handle);
        }
        for polyline in self.polylines {
            surface.destroy_polyline(polyline);
        }
    }
}

/// Mutable presentation state
#[derive(Debug, Default)]
struct Presentation {
    selection: SelectionId,
    state: RouteSelectionState,
    car: Option<DrawnRoute>,
    transit: Option<DrawnRoute>,
}

impl Presentation {
    const fn drawn(&self, mode: TravelMode) -> Option<&DrawnRoute> {
        match mode {
            TravelMode::Car => self.car.as_ref(),
            TravelMode::Transit => self.transit.as_ref(),
        }
    }
}

/// State shared with background transit tasks
struct Shared {
    surface: Arc<dyn DrawingSurfacePort>,
    presentation: Mutex<Presentation>,
}

impl Shared {
    fn is_current(&self, selection: SelectionId) -> bool {
        self.presentation.lock().selection == selection
    }

    /// Clear everything drawn and start a new selection generation
    fn begin(&self, query: Option<RouteQuery>) -> SelectionId {
        let surface = self.surface.as_ref();
        let mut guard = self.presentation.lock();
        let presentation = &mut *guard;

        for drawn in [presentation.car.take(), presentation.transit.take()]
            .into_iter()
            .flatten()
        {
            drawn.destroy(surface);
        }

        presentation.selection = presentation.selection.next();
        presentation.state =
            query.map_or_else(RouteSelectionState::default, RouteSelectionState::selecting);
        presentation.selection
    }

    fn apply_driving(&self, selection: SelectionId, result: RouteResult) -> bool {
        let surface = self.surface.as_ref();
        let mut guard = self.presentation.lock();
        let presentation = &mut *guard;

        if presentation.selection != selection {
            warn!(%selection, current = %presentation.selection, "Discarding stale driving result");
            return false;
        }

        match &result {
            Ok(plan) => {
                let drawn = DrawnRoute::draw(surface, plan);
                if presentation.state.active_mode == TravelMode::Car {
                    drawn.show(surface);
                }
                presentation.car = Some(drawn);
                debug!(
                    distance_km = plan.distance_km,
                    duration_min = plan.duration_min,
                    "Driving route drawn"
                );
            },
            Err(err) => warn!(error = %err, "Driving route unavailable"),
        }

        presentation.state.driving_result = Some(result);
        true
    }

    fn apply_transit(&self, selection: SelectionId, result: RouteResult) -> bool {
        let surface = self.surface.as_ref();
        let mut guard = self.presentation.lock();
        let presentation = &mut *guard;

        if presentation.selection != selection {
            warn!(%selection, current = %presentation.selection, "Discarding stale transit result");
            return false;
        }

        presentation.state.transit_pending = false;
        let showing_transit = presentation.state.active_mode == TravelMode::Transit;

        match &result {
            Ok(plan) => {
                let drawn = DrawnRoute::draw(surface, plan);
                if showing_transit {
                    drawn.show(surface);
                }
                presentation.transit = Some(drawn);
                debug!(
                    duration_min = plan.duration_min,
                    legs = plan.legs.len(),
                    "Transit route drawn"
                );
            },
            Err(err) => {
                warn!(error = %err, "Transit route unavailable");
                if showing_transit {
                    presentation.state.active_mode = TravelMode::Car;
                    if let Some(car) = &presentation.car {
                        car.show(surface);
                    }
                    info!("Transit failed while shown, reverted to car");
                }
            },
        }

        presentation.state.transit_result = Some(result);
        true
    }

    fn switch(&self, target: TravelMode) -> Result<(), ApplicationError> {
        let surface = self.surface.as_ref();
        let mut guard = self.presentation.lock();
        let presentation = &mut *guard;

        if presentation.state.selected_destination.is_none() {
            return Err(ApplicationError::NoSelection);
        }
        if !presentation.state.can_show(target) {
            debug!(mode = %target, "Mode switch rejected");
            return Err(ApplicationError::ModeUnavailable { mode: target });
        }

        let current = presentation.state.active_mode;
        if current == target {
            return Ok(());
        }

        if let Some(drawn) = presentation.drawn(current) {
            drawn.hide(surface);
        }
        presentation.state.active_mode = target;
        if let Some(drawn) = presentation.drawn(target) {
            drawn.show(surface);
        }

        info!(from = %current, to = %target, "Switched route mode");
        Ok(())
    }

    fn click(&self, marker: MarkerHandle) -> bool {
        let surface = self.surface.as_ref();
        let presentation = self.presentation.lock();

        let Some(drawn) = presentation.drawn(presentation.state.active_mode) else {
            return false;
        };
        let Some(clicked) = drawn.markers.iter().find(|m| m.handle == marker) else {
            return false;
        };

        for sibling in drawn.markers.iter().filter(|m| m.handle != marker) {
            surface.close_info_bubble(sibling.handle);
        }
        surface.open_info_bubble(clicked.handle, &clicked.bubble_html);
        true
    }
}

/// Multi-modal route presentation for hospital selections
pub struct RoutePresentationService {
    driving: Arc<dyn RouteProviderPort>,
    transit: Arc<dyn RouteProviderPort>,
    shared: Arc<Shared>,
    config: PresentationConfig,
}

impl fmt::Debug for RoutePresentationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePresentationService")
            .field("driving", &self.driving.mode())
            .field("transit", &self.transit.mode())
            .field("selection", &self.current_selection())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RoutePresentationService {
    /// Create a new presentation service
    #[must_use]
    pub fn new(
        driving: Arc<dyn RouteProviderPort>,
        transit: Arc<dyn RouteProviderPort>,
        surface: Arc<dyn DrawingSurfacePort>,
        config: PresentationConfig,
    ) -> Self {
        Self {
            driving,
            transit,
            shared: Arc::new(Shared {
                surface,
                presentation: Mutex::new(Presentation::default()),
            }),
            config,
        }
    }

    /// Select a destination
    ///
    /// Clears the previous selection, awaits and shows the driving route, and
    /// starts the transit fetch in the background. The returned handle may be
    /// dropped or awaited.
    #[instrument(skip(self, query), fields(destination = %query.destination_label))]
    pub async fn select(&self, query: RouteQuery) -> PendingTransit {
        let selection = self.shared.begin(Some(query.clone()));
        info!(%selection, "Destination selected");

        let handle = tokio::spawn(fetch_transit(
            Arc::clone(&self.transit),
            Arc::clone(&self.shared),
            selection,
            query.clone(),
            self.config.transit_delay(),
        ));

        let driving = self.driving.fetch_route(&query).await;
        self.shared.apply_driving(selection, driving);

        PendingTransit { selection, handle }
    }

    /// Show another mode without re-fetching
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the state untouched, when nothing is selected
    /// or the target mode has no route to show.
    pub fn switch_mode(&self, target: TravelMode) -> Result<(), ApplicationError> {
        self.shared.switch(target)
    }

    /// Drop the current selection and everything drawn for it
    pub fn deselect(&self) {
        let selection = self.shared.begin(None);
        info!(%selection, "Selection cleared");
    }

    /// Open the info bubble of a stop marker, closing its siblings
    ///
    /// Returns false if the marker is not part of the visible route.
    pub fn on_marker_click(&self, marker: MarkerHandle) -> bool {
        self.shared.click(marker)
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> RouteSelectionState {
        self.shared.presentation.lock().state.clone()
    }

    /// One-line description of what is shown
    #[must_use]
    pub fn status_line(&self) -> String {
        self.shared.presentation.lock().state.status_line()
    }

    /// Generation of the current selection
    #[must_use]
    pub fn current_selection(&self) -> SelectionId {
        self.shared.presentation.lock().selection
    }

    /// Stop markers of the visible route
    #[must_use]
    pub fn visible_markers(&self) -> Vec<MarkerHandle> {
        let presentation = self.shared.presentation.lock();
        presentation
            .drawn(presentation.state.active_mode)
            .map(|d| d.markers.iter().map(|m| m.handle).collect())
            .unwrap_or_default()
    }
}

async fn fetch_transit(
    provider: Arc<dyn RouteProviderPort>,
    shared: Arc<Shared>,
    selection: SelectionId,
    query: RouteQuery,
    delay: Duration,
) -> TransitOutcome {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if !shared.is_current(selection) {
        debug!(%selection, "Selection changed before transit fetch");
        return TransitOutcome::Stale;
    }

    let result = provider.fetch_route(&query).await;
    if shared.apply_transit(selection, result) {
        TransitOutcome::Applied
    } else {
        TransitOutcome::Stale
    }
}

//! Application services - Use case implementations

pub mod route_artifacts;
mod route_presentation_service;
mod route_selection;

pub use route_artifacts::{StopMarkerSpec, StopRole};
pub use route_presentation_service::{
    PendingTransit, PresentationConfig, RoutePresentationService, TransitOutcome,
};
pub use route_selection::{RouteSelectionState, SelectionId};

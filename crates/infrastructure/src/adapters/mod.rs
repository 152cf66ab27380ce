//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod driving_adapter;
mod error_mapping;
mod tracing_surface;
mod transit_adapter;

pub use driving_adapter::DrivingRouteAdapter;
pub use tracing_surface::{MarkerView, PolylineView, SurfaceSnapshot, TracingDrawingSurface};
pub use transit_adapter::{TransitRouteAdapter, normalize_itinerary};

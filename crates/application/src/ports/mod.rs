//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod drawing_surface_port;
mod route_provider_port;

#[cfg(test)]
pub use drawing_surface_port::MockDrawingSurfacePort;
pub use drawing_surface_port::{
    DrawingSurfacePort, MarkerHandle, MarkerIcon, PolylineHandle, PolylineStyle, StrokeDash,
};
#[cfg(test)]
pub use route_provider_port::MockRouteProviderPort;
pub use route_provider_port::RouteProviderPort;

//! Domain entities - Route results and the hospital records they lead to

mod hospital;
mod route;

pub use hospital::{Hospital, format_opening_hours, promote_hospital};
pub use route::{
    DEFAULT_LINE_COLOR, RouteError, RouteLeg, RoutePlan, RouteResult, TransitStop, TravelKind,
    TravelMode, VehicleInfo, VehicleMode,
};

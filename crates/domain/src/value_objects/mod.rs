//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod route_query;

pub use coordinate::Coordinate;
pub use route_query::RouteQuery;

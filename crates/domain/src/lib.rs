//! Domain layer for CareRoute
//!
//! Contains the route model shared by both routing providers, the hospital
//! record handed over by the search backend, and the pure geometry engines
//! (polyline codec, duration normalization, walking estimates).
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod geometry;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

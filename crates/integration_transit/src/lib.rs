//! Public transit integration for CareRoute
//!
//! Provides multi-modal transit itineraries via the
//! [Google Routes API](https://developers.google.com/maps/documentation/routes)
//! `computeRoutes` endpoint in `TRANSIT` mode.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with the other integration crates.
//! [`TransitClient`] defines the interface for itinerary requests, implemented by
//! [`GoogleTransitClient`]. Responses are returned as typed, provider-shaped models
//! ([`TransitRoutesResponse`]); turning them into route legs is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{GoogleTransitClient, TransitClient, TransitConfig};
//!
//! let config = TransitConfig { api_key: Some(key), ..TransitConfig::default() };
//! let client = GoogleTransitClient::new(&config)?;
//!
//! let response = client.compute_routes(&origin, &destination, None).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{FIELD_MASK, GoogleTransitClient, TransitClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use models::{
    EncodedPolyline, LatLng, LocalizedTime, LocalizedValues, StopDetails, StopPoint,
    TransitDetails, TransitLine, TransitLocation, TransitRoute, TransitRouteLeg,
    TransitRoutesResponse, TransitStep, TransitVehicle, VehicleName,
};

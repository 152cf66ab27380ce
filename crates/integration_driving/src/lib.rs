//! Driving directions integration for CareRoute
//!
//! Queries the [Kakao Mobility directions API](https://developers.kakaomobility.com)
//! for a car route between two coordinates. The response carries road segments
//! whose vertices are already absolute longitude/latitude pairs, so no polyline
//! decoding is involved.
//!
//! # Architecture
//!
//! [`DrivingClient`] defines the interface, implemented by [`KakaoDrivingClient`].
//! The client reports failures as [`DrivingError`]; translating them into route
//! results is left to the infrastructure adapter.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_driving::{DrivingClient, DrivingConfig, KakaoDrivingClient};
//!
//! let config = DrivingConfig { api_key: Some(key), ..DrivingConfig::default() };
//! let client = KakaoDrivingClient::new(&config)?;
//! let route = client.directions(&origin, &destination).await?;
//! println!("{:.1} km", route.distance_km());
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{DrivingClient, KakaoDrivingClient};
pub use config::DrivingConfig;
pub use error::DrivingError;
pub use models::DrivingRoute;

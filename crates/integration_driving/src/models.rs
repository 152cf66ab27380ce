//! Driving route model

use domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};

/// A car route as reported by the directions service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingRoute {
    /// Total distance over all sections in meters
    pub distance_m: u64,
    /// Total duration over all sections in seconds
    pub duration_s: u64,
    /// Concatenated vertices of every road, in travel order
    pub path: Vec<Coordinate>,
    /// Number of road segments that contributed to the path
    pub road_count: usize,
}

impl DrivingRoute {
    /// Distance in kilometers
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_km(&self) -> f64 {
        self.distance_m as f64 / 1000.0
    }

    /// Duration rounded up to whole minutes
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_s.div_ceil(60).min(u64::from(u32::MAX)) as u32
    }
}

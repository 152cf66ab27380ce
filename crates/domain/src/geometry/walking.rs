//! Walking time estimates for transit itineraries
//!
//! Walking legs rarely come with a reliable duration, so their time is derived
//! from the great-circle distance between leg endpoints at a fixed pace. When
//! walking happened but every estimate came out as zero, a floor is applied so
//! the itinerary never claims zero minutes of walking.

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Default walking pace
pub const DEFAULT_WALKING_SPEED_KMH: f64 = 4.0;

/// Default floor per walking leg when all estimates are zero
pub const DEFAULT_MIN_MINUTES_PER_LEG: u32 = 2;

/// Pace and floor used to estimate walking time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkingPolicy {
    /// Walking pace in km/h
    pub speed_kmh: f64,
    /// Floor per walking leg applied when the total would be zero
    pub min_minutes_per_leg: u32,
}

impl Default for WalkingPolicy {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_WALKING_SPEED_KMH,
            min_minutes_per_leg: DEFAULT_MIN_MINUTES_PER_LEG,
        }
    }
}

impl WalkingPolicy {
    /// Minutes needed to walk a distance, rounded up
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn minutes_for_distance(&self, distance_km: f64) -> u32 {
        if !distance_km.is_finite() || distance_km <= 0.0 || self.speed_kmh <= 0.0 {
            return 0;
        }
        (distance_km / self.speed_kmh * 60.0)
            .ceil()
            .min(f64::from(u32::MAX)) as u32
    }

    /// Minutes needed to walk straight between two points
    #[must_use]
    pub fn minutes_between(&self, from: &Coordinate, to: &Coordinate) -> u32 {
        self.minutes_for_distance(from.distance_km(to))
    }

    /// Apply the zero-walking floor: `max(min, legs × min)`
    #[must_use]
    pub fn floor_total(&self, total_minutes: u32, walking_legs: u32) -> u32 {
        if walking_legs == 0 || total_minutes > 0 {
            return total_minutes;
        }
        walking_legs
            .saturating_mul(self.min_minutes_per_leg)
            .max(self.min_minutes_per_leg)
    }
}

/// Accumulates walking legs of one itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkingTally {
    legs: u32,
    minutes: u32,
    estimated: bool,
}

impl WalkingTally {
    /// Start an empty tally
    #[must_use]
    pub const fn new() -> Self {
        Self {
            legs: 0,
            minutes: 0,
            estimated: false,
        }
    }

    /// A walking leg whose duration the provider reported
    pub fn add_reported(&mut self, minutes: u32) {
        self.legs += 1;
        self.minutes = self.minutes.saturating_add(minutes);
    }

    /// A walking leg whose duration was derived from distance
    pub fn add_estimated(&mut self, minutes: u32) {
        self.legs += 1;
        self.minutes = self.minutes.saturating_add(minutes);
        self.estimated = true;
    }

    /// A walking leg with neither a duration nor endpoints
    pub fn add_unknown(&mut self) {
        self.legs += 1;
        self.estimated = true;
    }

    /// Number of walking legs seen
    #[must_use]
    pub const fn legs(&self) -> u32 {
        self.legs
    }

    /// Total walking minutes after the floor, and whether any part was estimated
    #[must_use]
    pub fn finish(&self, policy: &WalkingPolicy) -> (u32, bool) {
        let total = policy.floor_total(self.minutes, self.legs);
        let floored = total != self.minutes;
        (total, self.estimated || floored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_for_distance() {
        let policy = WalkingPolicy::default();
        assert_eq!(policy.minutes_for_distance(0.0), 0);
        assert_eq!(policy.minutes_for_distance(1.0), 15);
        assert_eq!(policy.minutes_for_distance(0.1), 2);
        assert_eq!(policy.minutes_for_distance(0.05), 1);
        assert_eq!(policy.minutes_for_distance(f64::NAN), 0);
    }

    #[test]
    fn test_minutes_between_points() {
        let policy = WalkingPolicy::default();
        let a = Coordinate::new_unchecked(37.5, 127.0);
        let b = Coordinate::new_unchecked(37.5009, 127.0);
        assert_eq!(policy.minutes_between(&a, &b), 2);
        assert_eq!(policy.minutes_between(&a, &a), 0);
    }

    #[test]
    fn test_floor_applies_only_to_zero_totals() {
        let policy = WalkingPolicy::default();
        assert_eq!(policy.floor_total(0, 0), 0);
        assert_eq!(policy.floor_total(0, 1), 2);
        assert_eq!(policy.floor_total(0, 3), 6);
        assert_eq!(policy.floor_total(4, 3), 4);
    }

    #[test]
    fn test_single_zero_minute_leg_is_floored() {
        let policy = WalkingPolicy::default();
        let mut tally = WalkingTally::new();
        tally.add_estimated(0);
        let (minutes, estimated) = tally.finish(&policy);
        assert!(minutes >= 2);
        assert!(estimated);
    }

    #[test]
    fn test_reported_legs_are_not_estimated() {
        let mut tally = WalkingTally::new();
        tally.add_reported(1);
        tally.add_reported(2);
        assert_eq!(tally.legs(), 2);
        assert_eq!(tally.finish(&WalkingPolicy::default()), (3, false));
    }

    #[test]
    fn test_unknown_leg_counts_toward_floor() {
        let mut tally = WalkingTally::new();
        tally.add_unknown();
        tally.add_unknown();
        assert_eq!(tally.finish(&WalkingPolicy::default()), (4, true));
    }

    #[test]
    fn test_no_walking() {
        assert_eq!(WalkingTally::new().finish(&WalkingPolicy::default()), (0, false));
    }
}

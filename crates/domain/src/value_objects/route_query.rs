//! Route query value object

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A request for directions from the user to one destination
///
/// Created per hospital selection; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Where the user is
    pub origin: Coordinate,
    /// Where the user wants to go
    pub destination: Coordinate,
    /// Display label of the destination (hospital name)
    pub destination_label: String,
}

impl RouteQuery {
    /// Create a new route query
    #[must_use]
    pub fn new(origin: Coordinate, destination: Coordinate, label: impl Into<String>) -> Self {
        Self {
            origin,
            destination,
            destination_label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_query() {
        let origin = Coordinate::new_unchecked(37.5665, 126.978);
        let destination = Coordinate::new_unchecked(37.50, 127.03);
        let query = RouteQuery::new(origin, destination, "강남세브란스병원");

        assert_eq!(query.origin, origin);
        assert_eq!(query.destination, destination);
        assert_eq!(query.destination_label, "강남세브란스병원");
    }
}

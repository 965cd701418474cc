//! Geographic point type shared by parsing, validation and sorting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A geographical point with latitude and longitude.
///
/// Construction does not enforce coordinate ranges; range handling is the
/// job of the configured validation method, which either rejects or
/// normalizes out-of-range values before a point is attached to a sort
/// configuration. Equality is exact coordinate equality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90 once validated)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180 once validated)
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new geographical point.
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// Check whether both coordinates are within their legal ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_creation() {
        let point = GeoPoint::new(40.7128, -74.0060); // New York City
        assert_eq!(point.lat, 40.7128);
        assert_eq!(point.lon, -74.0060);
        assert!(point.is_valid());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        assert!(!GeoPoint::new(91.0, 0.0).is_valid()); // Invalid latitude
        assert!(!GeoPoint::new(0.0, 181.0).is_valid()); // Invalid longitude
        assert!(GeoPoint::new(90.0, 180.0).is_valid()); // Boundary is legal
    }

    #[test]
    fn test_display_round_trips_through_string_encoding() {
        let point = GeoPoint::new(3.5, 2.1);
        assert_eq!(point.to_string(), "3.5,2.1");
    }

    #[test]
    fn test_exact_equality() {
        assert_eq!(GeoPoint::new(1.0, 2.0), GeoPoint::new(1.0, 2.0));
        assert_ne!(GeoPoint::new(1.0, 2.0), GeoPoint::new(1.0, 2.0000001));
    }
}

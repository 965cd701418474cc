//! Coordinate validation policies for parsed reference points.

use std::fmt;

use crate::error::{AzimuthError, Result};
use crate::geo::point::GeoPoint;

/// How to treat out-of-range coordinates in a sort configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeoValidationMethod {
    /// Normalize into range: longitude wraps modulo 360, latitude clamps.
    #[default]
    Coerce,
    /// Reject the whole configuration on the first out-of-range coordinate.
    Strict,
}

impl GeoValidationMethod {
    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            GeoValidationMethod::Coerce => "coerce",
            GeoValidationMethod::Strict => "strict",
        }
    }

    /// Resolve a validation method name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "coerce" => Ok(GeoValidationMethod::Coerce),
            "strict" => Ok(GeoValidationMethod::Strict),
            _ => Err(AzimuthError::unsupported_value(format!(
                "unknown validation method [{name}]"
            ))),
        }
    }
}

impl fmt::Display for GeoValidationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Apply the validation method to every point, in place.
///
/// Runs once, after parsing and before the points are attached to a sort
/// configuration. Strict validation fails on the first offending
/// coordinate; there is no partial success.
pub fn validate_points(
    field: &str,
    points: &mut [GeoPoint],
    method: GeoValidationMethod,
) -> Result<()> {
    for point in points.iter_mut() {
        match method {
            GeoValidationMethod::Strict => {
                if !(-90.0..=90.0).contains(&point.lat) {
                    return Err(AzimuthError::validation(format!(
                        "illegal latitude value [{}] for [{field}]",
                        point.lat
                    )));
                }
                if !(-180.0..=180.0).contains(&point.lon) {
                    return Err(AzimuthError::validation(format!(
                        "illegal longitude value [{}] for [{field}]",
                        point.lon
                    )));
                }
            }
            GeoValidationMethod::Coerce => {
                point.lat = point.lat.clamp(-90.0, 90.0);
                point.lon = normalize_lon(point.lon);
            }
        }
    }
    Ok(())
}

/// Wrap a longitude modulo 360 into [-180, 180].
fn normalize_lon(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    (lon % 360.0 + 540.0) % 360.0 - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            GeoValidationMethod::from_name("STRICT").unwrap(),
            GeoValidationMethod::Strict
        );
        assert_eq!(
            GeoValidationMethod::from_name("coerce").unwrap(),
            GeoValidationMethod::Coerce
        );
        assert!(GeoValidationMethod::from_name("ignore_malformed").is_err());
    }

    #[test]
    fn test_strict_rejects_out_of_range_latitude() {
        let mut points = vec![GeoPoint::new(95.0, 10.0)];
        let err =
            validate_points("location", &mut points, GeoValidationMethod::Strict).unwrap_err();
        assert_eq!(
            err.to_string(),
            "illegal latitude value [95] for [location]"
        );
    }

    #[test]
    fn test_strict_rejects_out_of_range_longitude() {
        let mut points = vec![GeoPoint::new(10.0, 200.0)];
        let err =
            validate_points("location", &mut points, GeoValidationMethod::Strict).unwrap_err();
        assert_eq!(
            err.to_string(),
            "illegal longitude value [200] for [location]"
        );
    }

    #[test]
    fn test_strict_accepts_in_range_points() {
        let mut points = vec![GeoPoint::new(-90.0, 180.0), GeoPoint::new(45.0, -120.0)];
        validate_points("location", &mut points, GeoValidationMethod::Strict).unwrap();
    }

    #[test]
    fn test_coerce_clamps_latitude() {
        let mut points = vec![GeoPoint::new(95.0, 10.0)];
        validate_points("location", &mut points, GeoValidationMethod::Coerce).unwrap();
        assert_eq!(points[0], GeoPoint::new(90.0, 10.0));
    }

    #[test]
    fn test_coerce_wraps_longitude() {
        let mut points = vec![
            GeoPoint::new(0.0, 190.0),
            GeoPoint::new(0.0, -190.0),
            GeoPoint::new(0.0, 370.0),
        ];
        validate_points("location", &mut points, GeoValidationMethod::Coerce).unwrap();
        assert_eq!(points[0].lon, -170.0);
        assert_eq!(points[1].lon, 170.0);
        assert_eq!(points[2].lon, 10.0);
    }

    #[test]
    fn test_coerce_keeps_in_range_values_exact() {
        let mut points = vec![GeoPoint::new(3.5, 2.1), GeoPoint::new(-90.0, -180.0)];
        let original = points.clone();
        validate_points("location", &mut points, GeoValidationMethod::Coerce).unwrap();
        assert_eq!(points, original);
    }
}

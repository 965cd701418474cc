//! Distance units and distance-computation algorithms.
//!
//! Distances are always computed in meters (the base unit); a
//! [`DistanceUnit`] is a scale factor applied uniformly to a final
//! aggregated distance. A [`GeoDistance`] is a named strategy for computing
//! the distance between two points, selected independently of points and
//! unit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AzimuthError, Result};
use crate::geo::point::GeoPoint;

/// Mean earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Enumerated distance scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    /// Inches ("in")
    Inches,
    /// Yards ("yd")
    Yards,
    /// Feet ("ft")
    Feet,
    /// Kilometers ("km")
    Kilometers,
    /// Nautical miles ("nmi")
    NauticalMiles,
    /// Millimeters ("mm")
    Millimeters,
    /// Centimeters ("cm")
    Centimeters,
    /// Miles ("mi")
    Miles,
    /// Meters ("m"), the base unit
    #[default]
    Meters,
}

impl DistanceUnit {
    /// Number of meters in one unit.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            DistanceUnit::Inches => 0.0254,
            DistanceUnit::Yards => 0.9144,
            DistanceUnit::Feet => 0.3048,
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::NauticalMiles => 1852.0,
            DistanceUnit::Millimeters => 0.001,
            DistanceUnit::Centimeters => 0.01,
            DistanceUnit::Miles => 1609.344,
            DistanceUnit::Meters => 1.0,
        }
    }

    /// Convert a distance in meters into this unit.
    pub fn from_meters(&self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceUnit::Inches => "in",
            DistanceUnit::Yards => "yd",
            DistanceUnit::Feet => "ft",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::NauticalMiles => "nmi",
            DistanceUnit::Millimeters => "mm",
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Meters => "m",
        }
    }

    /// Resolve a unit name, case-insensitively, accepting common aliases.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "in" | "inch" => Ok(DistanceUnit::Inches),
            "yd" | "yards" => Ok(DistanceUnit::Yards),
            "ft" | "feet" => Ok(DistanceUnit::Feet),
            "km" | "kilometers" => Ok(DistanceUnit::Kilometers),
            "nm" | "nmi" | "nauticalmiles" => Ok(DistanceUnit::NauticalMiles),
            "mm" | "millimeters" => Ok(DistanceUnit::Millimeters),
            "cm" | "centimeters" => Ok(DistanceUnit::Centimeters),
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            "m" | "meters" => Ok(DistanceUnit::Meters),
            _ => Err(AzimuthError::unsupported_value(format!(
                "unknown distance unit [{name}]"
            ))),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Named strategies for computing the distance between two points.
///
/// This is the closed registry the sort configuration selects from by name;
/// every strategy returns meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeoDistance {
    /// Precise great-circle distance (haversine).
    #[default]
    Arc,
    /// Faster great-circle approximation (spherical law of cosines).
    SloppyArc,
    /// Planar approximation (equirectangular projection). Cheap and
    /// adequate for small distances away from the poles.
    Plane,
}

impl GeoDistance {
    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            GeoDistance::Arc => "arc",
            GeoDistance::SloppyArc => "sloppy_arc",
            GeoDistance::Plane => "plane",
        }
    }

    /// Resolve an algorithm name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "arc" => Ok(GeoDistance::Arc),
            "sloppy_arc" | "sloppyarc" => Ok(GeoDistance::SloppyArc),
            "plane" => Ok(GeoDistance::Plane),
            _ => Err(AzimuthError::unsupported_value(format!(
                "unknown distance type [{name}]"
            ))),
        }
    }

    /// Compute the distance between two points in meters.
    pub fn calculate(&self, from: &GeoPoint, to: &GeoPoint) -> f64 {
        match self {
            GeoDistance::Arc => haversine(from, to),
            GeoDistance::SloppyArc => law_of_cosines(from, to),
            GeoDistance::Plane => equirectangular(from, to),
        }
    }
}

impl fmt::Display for GeoDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn haversine(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

fn law_of_cosines(from: &GeoPoint, to: &GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let cos_angle =
        lat1_rad.sin() * lat2_rad.sin() + lat1_rad.cos() * lat2_rad.cos() * delta_lon.cos();

    // Rounding can push the cosine just past 1 for near-identical points.
    EARTH_RADIUS_M * cos_angle.clamp(-1.0, 1.0).acos()
}

fn equirectangular(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let mid_lat = ((from.lat + to.lat) / 2.0).to_radians();
    let x = (to.lon - from.lon).to_radians() * mid_lat.cos();
    let y = (to.lat - from.lat).to_radians();

    EARTH_RADIUS_M * (x * x + y * y).sqrt()
}

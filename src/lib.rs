//! # Azimuth
//!
//! Geo-distance sorting for search indexes.
//!
//! Azimuth builds per-document distance-based ordering keys for a search
//! index query, usable as a sort criterion alongside or instead of relevance
//! scoring. It accepts reference points in several encodings (lat/lon
//! objects, `"lat,lon"` strings, geohashes, `[lon, lat]` arrays), validates
//! and normalizes them, and produces an executable comparator for the
//! result-ranking stage.
//!
//! ## Features
//!
//! - Multi-format point parsing with strict, index-aware error reporting
//! - Strict or coercing coordinate validation
//! - Min/max/avg aggregation over multi-valued fields and multiple points
//! - Automatic selection of a specialized native comparator for the
//!   common single-point ascending case
//! - Exact round-tripping JSON wire format, including the deprecated
//!   `sort_mode` alias

pub mod cli;
pub mod error;
pub mod geo;
pub mod sort;

pub mod prelude {
    pub use crate::error::{AzimuthError, Result};
    pub use crate::geo::{DistanceUnit, GeoDistance, GeoPoint};
    pub use crate::sort::{
        DeprecationWarnings, GeoDistanceSortBuilder, GeoValidationMethod, NestedSortBuilder,
        SortMode, SortOrder,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

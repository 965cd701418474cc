//! Planning and construction of per-document distance comparators.
//!
//! Planning evaluates a closed decision table once per configuration: the
//! common case (exactly one point, base unit, ascending, no nested context,
//! on a field whose runtime representation supports native point-distance
//! ordering) reduces to a monotonic transform the index can evaluate
//! without materializing a distance per document. Every feature that breaks
//! that equivalence forces the general comparator, which computes the
//! distance from each indexed value to each configured point, aggregates
//! the full multiset with the sort mode, and scales by the unit.

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::{AzimuthError, Result};
use crate::geo::distance::{DistanceUnit, GeoDistance};
use crate::geo::point::GeoPoint;
use crate::sort::geo_distance::GeoDistanceSortBuilder;
use crate::sort::mode::SortMode;
use crate::sort::order::SortOrder;
use crate::sort::validation::validate_points;

/// Scope restricting which of a document's values participate in sorting.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueScope {
    /// Values of the root document.
    #[default]
    Root,
    /// Values of nested documents under `path` matching `filter`.
    Nested {
        /// Nested object path.
        path: Option<String>,
        /// Opaque filter expression restricting participating nested
        /// documents; interpreted by the field reader.
        filter: Option<Value>,
    },
}

/// Runtime access to a field's indexed geo values.
///
/// This is the narrow interface the surrounding index implements; the sort
/// core never touches physical storage.
pub trait GeoFieldReader: Send + Sync {
    /// All indexed geo values of `field` for `doc_id`, restricted to
    /// `scope`. An empty result means the document has no eligible values.
    fn points(&self, field: &str, doc_id: u32, scope: &ValueScope) -> Result<Vec<GeoPoint>>;

    /// Whether `field`'s runtime representation supports the native
    /// point-distance ordering primitive.
    fn supports_distance_sort(&self, field: &str) -> bool;
}

/// The comparator strategy chosen for a sort configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparatorPlan {
    /// Specialized single-point ascending comparator, evaluated natively
    /// over the field in base meters.
    NativeDistance {
        /// Sort field.
        field: String,
        /// Reference latitude.
        lat: f64,
        /// Reference longitude.
        lon: f64,
    },
    /// General comparator: compute all distances, aggregate, scale.
    ComputedDistance {
        /// Sort field.
        field: String,
        /// Reference points.
        points: Vec<GeoPoint>,
        /// Distance algorithm.
        distance_type: GeoDistance,
        /// Scale applied to the aggregated distance.
        unit: DistanceUnit,
        /// Aggregation over the distance multiset.
        mode: SortMode,
        /// Sort direction.
        order: SortOrder,
        /// Value scope.
        scope: ValueScope,
    },
}

/// Decide which comparator a configuration gets.
pub fn plan(sort: &GeoDistanceSortBuilder, reader: &dyn GeoFieldReader) -> Result<ComparatorPlan> {
    let mut points = sort.points().to_vec();
    if points.is_empty() {
        return Err(AzimuthError::configuration("no points supplied"));
    }
    validate_points(sort.field(), &mut points, sort.validation())?;

    let nested = sort.nested();

    let fast_path = points.len() == 1
        && sort.unit() == DistanceUnit::Meters
        && sort.order() == SortOrder::Asc
        && nested.is_none()
        && reader.supports_distance_sort(sort.field());

    if fast_path {
        let point = points[0];
        return Ok(ComparatorPlan::NativeDistance {
            field: sort.field().to_string(),
            lat: point.lat,
            lon: point.lon,
        });
    }

    let scope = match nested {
        Some(nested) => ValueScope::Nested {
            path: nested.path().map(str::to_string),
            filter: nested.filter().cloned(),
        },
        None => ValueScope::Root,
    };

    Ok(ComparatorPlan::ComputedDistance {
        field: sort.field().to_string(),
        points,
        distance_type: sort.distance_type(),
        unit: sort.unit(),
        mode: sort.effective_sort_mode(),
        order: sort.order(),
        scope,
    })
}

/// A per-document ordering key extractor.
///
/// Implementations are side-effect free and safe to invoke concurrently
/// against different documents.
pub trait DocComparator: Send + Sync {
    /// The ordering key for a document; `None` when the document has no
    /// eligible values (the ranking stage applies its standard
    /// missing-value policy).
    fn sort_key(&self, doc_id: u32) -> Result<Option<f64>>;

    /// Compare two documents under the configured direction; documents
    /// without a key sort last.
    fn compare(&self, a: u32, b: u32) -> Result<Ordering>;
}

/// How sort values are presented back to the caller in result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortValueFormat {
    /// The raw numeric key, unchanged.
    #[default]
    Raw,
}

impl SortValueFormat {
    /// Render a sort key for a result payload.
    pub fn format(&self, key: f64) -> Value {
        match self {
            SortValueFormat::Raw => serde_json::json!(key),
        }
    }
}

/// A built comparator paired with the formatter used for presenting sort
/// values, handed opaquely to the ranking stage.
pub struct SortKeyAndFormat<'a> {
    /// The plan the comparator was built from.
    pub plan: ComparatorPlan,
    /// The per-document comparator.
    pub comparator: Box<dyn DocComparator + 'a>,
    /// Formatter for result payload sort values.
    pub format: SortValueFormat,
}

/// Build the comparator for a sort configuration against a field reader.
///
/// This is the entry point the ranking stage consumes.
pub fn build_sort<'a>(
    sort: &GeoDistanceSortBuilder,
    reader: &'a dyn GeoFieldReader,
) -> Result<SortKeyAndFormat<'a>> {
    let plan = plan(sort, reader)?;
    let comparator: Box<dyn DocComparator + 'a> = match &plan {
        ComparatorPlan::NativeDistance { field, lat, lon } => {
            // The native primitive orders by unscaled ascending arc
            // distance over root values; bind the same semantics here.
            Box::new(GeoDistanceComparator {
                reader,
                field: field.clone(),
                points: vec![GeoPoint::new(*lat, *lon)],
                distance_type: GeoDistance::Arc,
                unit: DistanceUnit::Meters,
                mode: SortMode::Min,
                order: SortOrder::Asc,
                scope: ValueScope::Root,
            })
        }
        ComparatorPlan::ComputedDistance {
            field,
            points,
            distance_type,
            unit,
            mode,
            order,
            scope,
        } => Box::new(GeoDistanceComparator {
            reader,
            field: field.clone(),
            points: points.clone(),
            distance_type: *distance_type,
            unit: *unit,
            mode: *mode,
            order: *order,
            scope: scope.clone(),
        }),
    };

    Ok(SortKeyAndFormat {
        plan,
        comparator,
        format: SortValueFormat::Raw,
    })
}

/// The general distance comparator: all already-resolved parameters bound
/// to a field reader.
struct GeoDistanceComparator<'a> {
    reader: &'a dyn GeoFieldReader,
    field: String,
    points: Vec<GeoPoint>,
    distance_type: GeoDistance,
    unit: DistanceUnit,
    mode: SortMode,
    order: SortOrder,
    scope: ValueScope,
}

impl DocComparator for GeoDistanceComparator<'_> {
    fn sort_key(&self, doc_id: u32) -> Result<Option<f64>> {
        let values = self.reader.points(&self.field, doc_id, &self.scope)?;
        if values.is_empty() {
            return Ok(None);
        }
        // Distance from every indexed value to every configured point.
        let distances: Vec<f64> = values
            .iter()
            .flat_map(|value| {
                self.points
                    .iter()
                    .map(|point| self.distance_type.calculate(point, value))
            })
            .collect();
        Ok(self
            .mode
            .apply(&distances)
            .map(|meters| self.unit.from_meters(meters)))
    }

    fn compare(&self, a: u32, b: u32) -> Result<Ordering> {
        let (key_a, key_b) = (self.sort_key(a)?, self.sort_key(b)?);
        Ok(match (key_a, key_b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ordering = x.total_cmp(&y);
                match self.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            }
        })
    }
}

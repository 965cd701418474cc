//! Geo-distance sort clause configuration and its wire codec.
//!
//! A [`GeoDistanceSortBuilder`] is constructed once per query sort clause,
//! either programmatically or by decoding wire input, is read-only once
//! handed to the planner, and is discarded after the comparator is built.
//!
//! # Wire format
//!
//! An object keyed by the field name, whose value supplies the reference
//! points (see [`crate::sort::points`]); sibling keys configure the sort:
//!
//! ```json
//! {
//!   "location": [ { "lat": 40.7, "lon": -74.0 } ],
//!   "unit": "km",
//!   "distance_type": "arc",
//!   "mode": "min",
//!   "order": "asc",
//!   "nested": { "path": "offices" },
//!   "validation_method": "strict"
//! }
//! ```
//!
//! `sort_mode` is a deprecated alias for `mode`; it decodes identically but
//! records a deprecation warning. Unknown keys fail decoding. Encoding
//! reproduces every explicitly-set option, omits defaults, and always
//! serializes points as an array of `{lat,lon}` objects in original parse
//! order.

use serde_json::{Map, Value, json};

use crate::error::{AzimuthError, Result};
use crate::geo::distance::{DistanceUnit, GeoDistance};
use crate::geo::point::GeoPoint;
use crate::sort::mode::SortMode;
use crate::sort::nested::NestedSortBuilder;
use crate::sort::order::SortOrder;
use crate::sort::points::{parse_point_text, parse_points};
use crate::sort::validation::{GeoValidationMethod, validate_points};
use crate::sort::warnings::DeprecationWarnings;

/// Builder for sorting documents by distance to one or more reference
/// points.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDistanceSortBuilder {
    field: String,
    points: Vec<GeoPoint>,
    unit: DistanceUnit,
    distance_type: GeoDistance,
    order: SortOrder,
    sort_mode: Option<SortMode>,
    validation: GeoValidationMethod,
    nested_path: Option<String>,
    nested_sort: Option<NestedSortBuilder>,
}

impl GeoDistanceSortBuilder {
    /// Create a sort on `field` by distance to `points`.
    pub fn new<F: Into<String>>(field: F, points: Vec<GeoPoint>) -> Result<Self> {
        let field = field.into();
        if field.is_empty() {
            return Err(AzimuthError::configuration("field name must not be empty"));
        }
        if points.is_empty() {
            return Err(AzimuthError::configuration("no points supplied"));
        }
        Ok(GeoDistanceSortBuilder {
            field,
            points,
            unit: DistanceUnit::default(),
            distance_type: GeoDistance::default(),
            order: SortOrder::default(),
            sort_mode: None,
            validation: GeoValidationMethod::default(),
            nested_path: None,
            nested_sort: None,
        })
    }

    /// Create a sort by distance to a single reference coordinate.
    pub fn from_point<F: Into<String>>(field: F, lat: f64, lon: f64) -> Result<Self> {
        Self::new(field, vec![GeoPoint::new(lat, lon)])
    }

    /// Create a sort from textual point encodings (`"lat,lon"` strings or
    /// geohashes).
    pub fn from_strings<F: Into<String>>(field: F, texts: &[&str]) -> Result<Self> {
        let field = field.into();
        let points = texts
            .iter()
            .map(|text| parse_point_text(&field, text))
            .collect::<Result<Vec<_>>>()?;
        Self::new(field, points)
    }

    /// The field holding the indexed geo values.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The reference points, in original parse order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// The distance unit applied to the aggregated distance.
    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// The distance-computation algorithm.
    pub fn distance_type(&self) -> GeoDistance {
        self.distance_type
    }

    /// The sort direction.
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// The explicitly configured aggregation mode, if any.
    pub fn sort_mode(&self) -> Option<SortMode> {
        self.sort_mode
    }

    /// The coordinate validation method.
    pub fn validation(&self) -> GeoValidationMethod {
        self.validation
    }

    /// The legacy direct nested path, if set.
    pub fn nested_path(&self) -> Option<&str> {
        self.nested_path.as_deref()
    }

    /// The nested sort descriptor, if set.
    pub fn nested_sort(&self) -> Option<&NestedSortBuilder> {
        self.nested_sort.as_ref()
    }

    /// Append a reference point.
    pub fn point(mut self, lat: f64, lon: f64) -> Self {
        self.points.push(GeoPoint::new(lat, lon));
        self
    }

    /// Replace the reference points.
    pub fn with_points(mut self, points: Vec<GeoPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(AzimuthError::configuration("no points supplied"));
        }
        self.points = points;
        Ok(self)
    }

    /// Set the distance unit.
    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the distance-computation algorithm.
    pub fn with_distance_type(mut self, distance_type: GeoDistance) -> Self {
        self.distance_type = distance_type;
        self
    }

    /// Set the sort direction.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the aggregation mode. `Sum` is not a meaningful aggregation for
    /// distances and is rejected.
    pub fn with_sort_mode(mut self, mode: SortMode) -> Result<Self> {
        reject_sum(mode)?;
        self.sort_mode = Some(mode);
        Ok(self)
    }

    /// Set the coordinate validation method.
    pub fn with_validation(mut self, validation: GeoValidationMethod) -> Self {
        self.validation = validation;
        self
    }

    /// Set the nested path directly (legacy form). Incompatible with a
    /// nested sort descriptor; the two must unify to one representation.
    pub fn with_nested_path<P: Into<String>>(mut self, path: P) -> Result<Self> {
        if self.nested_sort.is_some() {
            return Err(nested_conflict());
        }
        self.nested_path = Some(path.into());
        Ok(self)
    }

    /// Set the nested sort descriptor. Incompatible with a directly-set
    /// nested path.
    pub fn with_nested_sort(mut self, nested: NestedSortBuilder) -> Result<Self> {
        if self.nested_path.is_some() {
            return Err(nested_conflict());
        }
        self.nested_sort = Some(nested);
        Ok(self)
    }

    /// The aggregation mode in effect: the configured one, or the natural
    /// default for the direction (min when ascending, max when descending).
    pub fn effective_sort_mode(&self) -> SortMode {
        self.sort_mode.unwrap_or(match self.order {
            SortOrder::Asc => SortMode::Min,
            SortOrder::Desc => SortMode::Max,
        })
    }

    /// The nested context, with the legacy direct path unified into a
    /// descriptor.
    pub fn nested(&self) -> Option<NestedSortBuilder> {
        match (&self.nested_sort, &self.nested_path) {
            (Some(nested), _) => Some(nested.clone()),
            (None, Some(path)) => Some(NestedSortBuilder::new(path.clone())),
            (None, None) => None,
        }
    }

    /// Decode a sort clause from wire input.
    ///
    /// `warnings` is the side channel collecting deprecation warnings, such
    /// as use of the `sort_mode` alias.
    pub fn from_value(value: &Value, warnings: &mut DeprecationWarnings) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            AzimuthError::configuration("geo distance sort must be an object")
        })?;

        let mut field: Option<(&String, &Value)> = None;
        let mut unit = DistanceUnit::default();
        let mut distance_type = GeoDistance::default();
        let mut order = SortOrder::default();
        let mut sort_mode = None;
        let mut validation = GeoValidationMethod::default();
        let mut nested_sort = None;

        for (key, val) in obj {
            match key.as_str() {
                "unit" => unit = DistanceUnit::from_name(expect_str(key, val)?)?,
                "distance_type" => {
                    distance_type = GeoDistance::from_name(expect_str(key, val)?)?;
                }
                "mode" => sort_mode = Some(decode_mode(key, val)?),
                "sort_mode" => {
                    warnings
                        .deprecated("Deprecated field [sort_mode] used, expected [mode] instead");
                    sort_mode = Some(decode_mode(key, val)?);
                }
                "order" => order = SortOrder::from_name(expect_str(key, val)?)?,
                "nested" => nested_sort = Some(NestedSortBuilder::from_value(val)?),
                "validation_method" => {
                    validation = GeoValidationMethod::from_name(expect_str(key, val)?)?;
                }
                _ => {
                    if field.is_none() {
                        field = Some((key, val));
                    } else {
                        return Err(AzimuthError::configuration(format!(
                            "unknown field [{key}] in geo distance sort"
                        )));
                    }
                }
            }
        }

        let (field, points_value) = field.ok_or_else(|| {
            AzimuthError::configuration("geo distance sort requires a field with reference points")
        })?;
        if field.is_empty() {
            return Err(AzimuthError::configuration("field name must not be empty"));
        }
        let mut points = parse_points(field, points_value)?;
        validate_points(field, &mut points, validation)?;

        Ok(GeoDistanceSortBuilder {
            field: field.clone(),
            points,
            unit,
            distance_type,
            order,
            sort_mode,
            validation,
            nested_path: None,
            nested_sort,
        })
    }

    /// Encode this sort clause to its wire representation.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        let points: Vec<Value> = self
            .points
            .iter()
            .map(|p| json!({"lat": p.lat, "lon": p.lon}))
            .collect();
        obj.insert(self.field.clone(), Value::Array(points));

        if self.unit != DistanceUnit::default() {
            obj.insert("unit".to_string(), json!(self.unit.name()));
        }
        if self.distance_type != GeoDistance::default() {
            obj.insert("distance_type".to_string(), json!(self.distance_type.name()));
        }
        if let Some(mode) = self.sort_mode {
            obj.insert("mode".to_string(), json!(mode.name()));
        }
        if self.order != SortOrder::default() {
            obj.insert("order".to_string(), json!(self.order.name()));
        }
        if let Some(nested) = self.nested() {
            obj.insert("nested".to_string(), nested.to_value());
        }
        if self.validation != GeoValidationMethod::default() {
            obj.insert(
                "validation_method".to_string(),
                json!(self.validation.name()),
            );
        }
        Value::Object(obj)
    }
}

/// Reject the `sum` aggregation. The message is shared verbatim by the
/// imperative setter and wire decoding.
fn reject_sum(mode: SortMode) -> Result<()> {
    if mode == SortMode::Sum {
        return Err(AzimuthError::configuration(format!(
            "sort_mode [{}] isn't supported for sorting by geo distance",
            mode.name()
        )));
    }
    Ok(())
}

fn nested_conflict() -> AzimuthError {
    AzimuthError::configuration("cannot set both a nested path and a nested sort")
}

fn expect_str<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| AzimuthError::configuration(format!("[{key}] must be a string")))
}

fn decode_mode(key: &str, value: &Value) -> Result<SortMode> {
    let mode = SortMode::from_name(expect_str(key, value)?)?;
    reject_sum(mode)?;
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_defaults() {
        let sort = GeoDistanceSortBuilder::from_point("location", 3.5, 2.1).unwrap();
        assert_eq!(sort.field(), "location");
        assert_eq!(sort.points(), [GeoPoint::new(3.5, 2.1)]);
        assert_eq!(sort.unit(), DistanceUnit::Meters);
        assert_eq!(sort.distance_type(), GeoDistance::Arc);
        assert_eq!(sort.order(), SortOrder::Asc);
        assert_eq!(sort.sort_mode(), None);
        assert_eq!(sort.validation(), GeoValidationMethod::Coerce);
        assert!(sort.nested().is_none());
    }

    #[test]
    fn test_empty_field_name_is_rejected() {
        let err = GeoDistanceSortBuilder::from_point("", 1.0, 2.0).unwrap_err();
        assert_eq!(err.to_string(), "field name must not be empty");
    }

    #[test]
    fn test_empty_points_are_rejected() {
        let err = GeoDistanceSortBuilder::new("location", vec![]).unwrap_err();
        assert_eq!(err.to_string(), "no points supplied");

        let sort = GeoDistanceSortBuilder::from_point("location", 1.0, 2.0).unwrap();
        assert!(sort.with_points(vec![]).is_err());
    }

    #[test]
    fn test_from_strings_accepts_both_text_encodings() {
        let sort =
            GeoDistanceSortBuilder::from_strings("location", &["1,2", "s3y0zh7w1z0g"]).unwrap();
        assert_eq!(sort.points().len(), 2);
        assert_eq!(sort.points()[0], GeoPoint::new(1.0, 2.0));
        assert!((sort.points()[1].lat - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_appends() {
        let sort = GeoDistanceSortBuilder::from_point("location", 1.0, 2.0)
            .unwrap()
            .point(3.0, 4.0);
        assert_eq!(sort.points().len(), 2);
    }

    #[test]
    fn test_effective_sort_mode_follows_direction() {
        let sort = GeoDistanceSortBuilder::from_point("location", 1.0, 2.0).unwrap();
        assert_eq!(sort.effective_sort_mode(), SortMode::Min);

        let sort = sort.with_order(SortOrder::Desc);
        assert_eq!(sort.effective_sort_mode(), SortMode::Max);

        let sort = sort.with_sort_mode(SortMode::Avg).unwrap();
        assert_eq!(sort.effective_sort_mode(), SortMode::Avg);
    }

    #[test]
    fn test_nested_path_and_nested_sort_conflict() {
        let err = GeoDistanceSortBuilder::from_point("location", 1.0, 2.0)
            .unwrap()
            .with_nested_path("offices")
            .unwrap()
            .with_nested_sort(NestedSortBuilder::new("offices"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot set both a nested path and a nested sort"
        );

        let err = GeoDistanceSortBuilder::from_point("location", 1.0, 2.0)
            .unwrap()
            .with_nested_sort(NestedSortBuilder::new("offices"))
            .unwrap()
            .with_nested_path("offices")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot set both a nested path and a nested sort"
        );
    }

    #[test]
    fn test_legacy_nested_path_unifies_to_descriptor() {
        let sort = GeoDistanceSortBuilder::from_point("location", 1.0, 2.0)
            .unwrap()
            .with_nested_path("offices")
            .unwrap();
        assert_eq!(sort.nested(), Some(NestedSortBuilder::new("offices")));
    }

    #[test]
    fn test_encode_omits_defaults() {
        let sort = GeoDistanceSortBuilder::from_point("location", 3.5, 2.1).unwrap();
        let value = sort.to_value();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(
            obj["location"],
            json!([{"lat": 3.5, "lon": 2.1}])
        );
    }

    #[test]
    fn test_encode_emits_explicit_options() {
        let sort = GeoDistanceSortBuilder::from_point("location", 3.5, 2.1)
            .unwrap()
            .with_unit(DistanceUnit::Kilometers)
            .with_order(SortOrder::Desc)
            .with_sort_mode(SortMode::Max)
            .unwrap()
            .with_validation(GeoValidationMethod::Strict);
        let value = sort.to_value();
        assert_eq!(value["unit"], json!("km"));
        assert_eq!(value["order"], json!("desc"));
        assert_eq!(value["mode"], json!("max"));
        assert_eq!(value["validation_method"], json!("strict"));
    }

    #[test]
    fn test_points_always_encode_as_objects() {
        let mut warnings = DeprecationWarnings::new();
        let decoded = GeoDistanceSortBuilder::from_value(
            &json!({"location": ["1,2", "s3y0zh7w1z0g", [5.0, 6.0]]}),
            &mut warnings,
        )
        .unwrap();
        let value = decoded.to_value();
        let points = value["location"].as_array().unwrap();
        assert_eq!(points.len(), 3);
        for point in points {
            assert!(point.get("lat").is_some() && point.get("lon").is_some());
        }
        // Original parse order is preserved.
        assert_eq!(points[0], json!({"lat": 1.0, "lon": 2.0}));
        assert_eq!(points[2], json!({"lat": 6.0, "lon": 5.0}));
    }

    #[test]
    fn test_decode_unknown_key_is_rejected() {
        let mut warnings = DeprecationWarnings::new();
        let err = GeoDistanceSortBuilder::from_value(
            &json!({"location": "1,2", "reverse": true}),
            &mut warnings,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown field [reverse] in geo distance sort"
        );
    }

    #[test]
    fn test_decode_requires_a_field() {
        let mut warnings = DeprecationWarnings::new();
        let err = GeoDistanceSortBuilder::from_value(&json!({"unit": "km"}), &mut warnings)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "geo distance sort requires a field with reference points"
        );
    }

    #[test]
    fn test_decode_applies_coercion_before_attaching_points() {
        let mut warnings = DeprecationWarnings::new();
        let sort = GeoDistanceSortBuilder::from_value(
            &json!({"location": {"lat": 95.0, "lon": 2.1}}),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(sort.points(), [GeoPoint::new(90.0, 2.1)]);
    }

    #[test]
    fn test_decode_strict_validation_fails_eagerly() {
        let mut warnings = DeprecationWarnings::new();
        let err = GeoDistanceSortBuilder::from_value(
            &json!({"location": {"lat": 95.0, "lon": 2.1}, "validation_method": "STRICT"}),
            &mut warnings,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "illegal latitude value [95] for [location]"
        );
    }
}

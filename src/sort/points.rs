//! Multi-format reference point parsing.
//!
//! The value under a sort clause's field-name key supplies the reference
//! points. Four encodings are accepted, freely intermixable within one
//! array:
//!
//! - `{"lat": <num>, "lon": <num>}` object
//! - `"lat,lon"` decimal string
//! - geohash string
//! - 2-element numeric array `[lon, lat]` (longitude first, matching
//!   common geometry convention)
//!
//! A bare value of any encoding is a single-point spec; a bare array of two
//! numbers is one `[lon, lat]` point, not two points.

use std::fmt;

use serde_json::Value;

use crate::error::{AzimuthError, Result};
use crate::geo::geohash;
use crate::geo::point::GeoPoint;

/// Parse the point input of a sort clause into an ordered point sequence.
pub fn parse_points(field: &str, value: &Value) -> Result<Vec<GeoPoint>> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(AzimuthError::configuration("no points supplied"));
            }
            if items.iter().all(Value::is_number) {
                return Ok(vec![parse_numeric_array(field, items, None)?]);
            }
            items
                .iter()
                .enumerate()
                .map(|(index, item)| parse_single(field, item, Some(index)))
                .collect()
        }
        other => Ok(vec![parse_single(field, other, None)?]),
    }
}

/// Parse a textual point encoding (`"lat,lon"` or geohash) outside of any
/// wire value, for programmatic construction.
pub(crate) fn parse_point_text(field: &str, text: &str) -> Result<GeoPoint> {
    parse_string(field, text, None)
}

/// Parse one point encoding. `index` is the element position when the
/// encoding came from an array of points.
fn parse_single(field: &str, value: &Value, index: Option<usize>) -> Result<GeoPoint> {
    match value {
        Value::Object(_) => parse_object(field, value, index),
        Value::String(text) => parse_string(field, text, index),
        Value::Array(items) if items.iter().all(Value::is_number) => {
            parse_numeric_array(field, items, index)
        }
        _ => Err(parse_error(
            field,
            index,
            "expected an object, a string or a [lon, lat] array",
        )),
    }
}

fn parse_object(field: &str, value: &Value, index: Option<usize>) -> Result<GeoPoint> {
    let obj = value.as_object().expect("caller checked object");
    let mut lat = None;
    let mut lon = None;
    for (key, val) in obj {
        if !matches!(key.as_str(), "lat" | "lon") {
            return Err(parse_error(
                field,
                index,
                format_args!("field must be [lat] or [lon], got [{key}]"),
            ));
        }
        let number = val.as_f64().ok_or_else(|| {
            parse_error(field, index, format_args!("[{key}] must be a number"))
        })?;
        if key == "lat" {
            lat = Some(number);
        } else {
            lon = Some(number);
        }
    }
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(GeoPoint::new(lat, lon)),
        _ => Err(parse_error(
            field,
            index,
            "point object must have both [lat] and [lon]",
        )),
    }
}

fn parse_string(field: &str, text: &str, index: Option<usize>) -> Result<GeoPoint> {
    if let Some((lat_str, lon_str)) = text.split_once(',') {
        let lat = lat_str.trim().parse::<f64>().map_err(|_| {
            parse_error(
                field,
                index,
                format_args!("invalid latitude [{}]", lat_str.trim()),
            )
        })?;
        let lon = lon_str.trim().parse::<f64>().map_err(|_| {
            parse_error(
                field,
                index,
                format_args!("invalid longitude [{}]", lon_str.trim()),
            )
        })?;
        return Ok(GeoPoint::new(lat, lon));
    }
    // Anything without a comma is a geohash.
    geohash::decode(text).map_err(|e| parse_error(field, index, e))
}

fn parse_numeric_array(field: &str, items: &[Value], index: Option<usize>) -> Result<GeoPoint> {
    if items.len() != 2 {
        return Err(parse_error(
            field,
            index,
            format_args!(
                "a coordinate array must contain exactly two numbers, got [{}]",
                items.len()
            ),
        ));
    }
    // Longitude first.
    let lon = items[0].as_f64().expect("caller checked numbers");
    let lat = items[1].as_f64().expect("caller checked numbers");
    Ok(GeoPoint::new(lat, lon))
}

fn parse_error(field: &str, index: Option<usize>, reason: impl fmt::Display) -> AzimuthError {
    match index {
        Some(i) => AzimuthError::parse(format!(
            "[{field}] failed to parse point at element [{i}]: {reason}"
        )),
        None => AzimuthError::parse(format!("[{field}] failed to parse point: {reason}")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_bare_object() {
        let points = parse_points("f", &json!({"lat": 3.5, "lon": 2.1})).unwrap();
        assert_eq!(points, vec![GeoPoint::new(3.5, 2.1)]);
    }

    #[test]
    fn test_bare_string() {
        let points = parse_points("f", &json!("1,2")).unwrap();
        assert_eq!(points, vec![GeoPoint::new(1.0, 2.0)]);
    }

    #[test]
    fn test_bare_geohash() {
        let points = parse_points("f", &json!("s3y0zh7w1z0g")).unwrap();
        assert!((points[0].lat - 10.0).abs() < 1e-5);
        assert!((points[0].lon - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_bare_numeric_array_is_one_point_lon_first() {
        let points = parse_points("f", &json!([1.2, 3])).unwrap();
        assert_eq!(points, vec![GeoPoint::new(3.0, 1.2)]);
    }

    #[test]
    fn test_mixed_array() {
        let value = json!([{"lat": 1.0, "lon": 2.0}, "s3y0zh7w1z0g", [1, 2], "1,2"]);
        let points = parse_points("f", &value).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], GeoPoint::new(1.0, 2.0));
        assert_eq!(points[2], GeoPoint::new(2.0, 1.0));
        assert_eq!(points[3], GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn test_point_order_is_preserved() {
        let value = json!(["1,2", "3,4", "5,6"]);
        let points = parse_points("f", &value).unwrap();
        assert_eq!(
            points,
            vec![
                GeoPoint::new(1.0, 2.0),
                GeoPoint::new(3.0, 4.0),
                GeoPoint::new(5.0, 6.0)
            ]
        );
    }

    #[test]
    fn test_empty_array_is_rejected() {
        let err = parse_points("f", &json!([])).unwrap_err();
        assert_eq!(err.to_string(), "no points supplied");
    }

    #[test]
    fn test_error_names_the_offending_element() {
        let value = json!(["1,2", {"lat": 1.0}, "3,4"]);
        let err = parse_points("f", &value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[f] failed to parse point at element [1]: point object must have both [lat] and [lon]"
        );
    }

    #[test]
    fn test_numeric_arity_is_strict() {
        let err = parse_points("f", &json!([1.0, 2.0, 3.0])).unwrap_err();
        assert!(err.to_string().contains("exactly two numbers, got [3]"));

        let err = parse_points("f", &json!(["1,2", [1.0, 2.0, 3.0]])).unwrap_err();
        assert!(err.to_string().contains("element [1]"));
    }

    #[test]
    fn test_unknown_object_key_is_rejected() {
        let err = parse_points("f", &json!({"lat": 1.0, "lng": 2.0})).unwrap_err();
        assert!(
            err.to_string()
                .contains("field must be [lat] or [lon], got [lng]")
        );
    }

    #[test]
    fn test_malformed_string_is_rejected() {
        let err = parse_points("f", &json!("not a point")).unwrap_err();
        assert!(err.to_string().contains("failed to parse point"));

        let err = parse_points("f", &json!("91.0,x")).unwrap_err();
        assert!(err.to_string().contains("invalid longitude [x]"));
    }

    #[test]
    fn test_unsupported_node_type_is_rejected() {
        assert!(parse_points("f", &json!(true)).is_err());
        assert!(parse_points("f", &json!(12.5)).is_err());
        assert!(parse_points("f", &json!(["1,2", null])).is_err());
    }

    #[test]
    fn test_equivalent_encodings_decode_to_same_coordinate() {
        // Same coordinate in all four encodings, within geohash precision.
        let object = parse_points("f", &json!({"lat": 10.0, "lon": 20.0})).unwrap()[0];
        let string = parse_points("f", &json!("10,20")).unwrap()[0];
        let array = parse_points("f", &json!([20.0, 10.0])).unwrap()[0];
        let hash = parse_points("f", &json!("s3y0zh7w1z0g")).unwrap()[0];

        assert_eq!(object, string);
        assert_eq!(object, array);
        assert!((hash.lat - object.lat).abs() < 1e-5);
        assert!((hash.lon - object.lon).abs() < 1e-5);
    }
}

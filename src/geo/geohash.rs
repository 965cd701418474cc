//! Base-32 geohash encoding and decoding.
//!
//! A geohash encodes a latitude/longitude pair as a base-32 string via
//! recursive spatial bisection: each character contributes five bits,
//! alternating between longitude and latitude refinement starting with
//! longitude. Decoding returns the center of the cell described by the
//! full string.

use lazy_static::lazy_static;

use crate::error::{AzimuthError, Result};
use crate::geo::point::GeoPoint;

/// The geohash base-32 alphabet (omits a, i, l and o).
const BASE32: &[u8] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest geohash worth emitting; 12 characters already bisect each axis
/// 30 times, well below f64 coordinate precision.
pub const MAX_PRECISION: usize = 12;

lazy_static! {
    /// Reverse lookup from byte to base-32 value, -1 for bytes outside the
    /// alphabet.
    static ref BASE32_DECODE: [i8; 256] = {
        let mut table = [-1i8; 256];
        for (value, &byte) in BASE32.iter().enumerate() {
            table[byte as usize] = value as i8;
        }
        table
    };
}

/// Decode a geohash string to the center point of its cell.
pub fn decode(hash: &str) -> Result<GeoPoint> {
    if hash.is_empty() {
        return Err(AzimuthError::parse("geohash must not be empty"));
    }

    let (mut lat_min, mut lat_max) = (-90.0f64, 90.0f64);
    let (mut lon_min, mut lon_max) = (-180.0f64, 180.0f64);
    let mut even_bit = true; // longitude first

    for ch in hash.bytes() {
        let value = BASE32_DECODE[ch as usize];
        if value < 0 {
            return Err(AzimuthError::parse(format!(
                "invalid geohash character [{}] in [{hash}]",
                ch as char
            )));
        }
        for shift in (0..5).rev() {
            let bit = (value >> shift) & 1;
            if even_bit {
                let mid = (lon_min + lon_max) / 2.0;
                if bit == 1 {
                    lon_min = mid;
                } else {
                    lon_max = mid;
                }
            } else {
                let mid = (lat_min + lat_max) / 2.0;
                if bit == 1 {
                    lat_min = mid;
                } else {
                    lat_max = mid;
                }
            }
            even_bit = !even_bit;
        }
    }

    Ok(GeoPoint::new(
        (lat_min + lat_max) / 2.0,
        (lon_min + lon_max) / 2.0,
    ))
}

/// Encode a point as a geohash of the given precision (number of
/// characters, capped at [`MAX_PRECISION`]).
pub fn encode(point: &GeoPoint, precision: usize) -> String {
    let precision = precision.clamp(1, MAX_PRECISION);
    let (mut lat_min, mut lat_max) = (-90.0f64, 90.0f64);
    let (mut lon_min, mut lon_max) = (-180.0f64, 180.0f64);
    let mut even_bit = true;
    let mut hash = String::with_capacity(precision);
    let mut value = 0usize;
    let mut bits = 0usize;

    while hash.len() < precision {
        if even_bit {
            let mid = (lon_min + lon_max) / 2.0;
            if point.lon >= mid {
                value = (value << 1) | 1;
                lon_min = mid;
            } else {
                value <<= 1;
                lon_max = mid;
            }
        } else {
            let mid = (lat_min + lat_max) / 2.0;
            if point.lat >= mid {
                value = (value << 1) | 1;
                lat_min = mid;
            } else {
                value <<= 1;
                lat_max = mid;
            }
        }
        even_bit = !even_bit;
        bits += 1;
        if bits == 5 {
            hash.push(BASE32[value] as char);
            value = 0;
            bits = 0;
        }
    }

    hash
}

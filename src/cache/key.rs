//! Cache key derivation
//!
//! Two requests share a key when their centers agree to
//! [`KEY_COORD_PRECISION`] decimal places and their radius and category sets
//! are equal. Centers closer than that rounding step share results; this is an
//! accepted approximation.

use crate::constants::cache::KEY_COORD_PRECISION;
use crate::coord::Coordinates;
use crate::poi::CategorySet;

/// Fingerprint of a retrieval request
pub fn fingerprint(center: Coordinates, radius_m: f64, categories: &CategorySet) -> String {
    format!(
        "places:{}:{}:{}:{}",
        round_coord(center.lat),
        round_coord(center.lng),
        format_radius(radius_m),
        categories
    )
}

fn round_coord(value: f64) -> String {
    let formatted = format!("{:.*}", KEY_COORD_PRECISION, value);
    // "-0.0000" and "0.0000" are the same place
    if formatted.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        formatted.trim_start_matches('-').to_string()
    } else {
        formatted
    }
}

fn format_radius(radius_m: f64) -> String {
    if radius_m.fract() == 0.0 {
        format!("{}", radius_m as i64)
    } else {
        format!("{}", radius_m)
    }
}

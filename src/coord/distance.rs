//! Great-circle distance
//!
//! Uses the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_METERS`](crate::constants::geo::EARTH_RADIUS_METERS).
//! Good to a fraction of a percent, which is plenty for "what is nearby".

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::Coordinates;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// Symmetric, zero for identical points, and defined everywhere including the
/// poles and antipodal pairs (`a` is clamped to [0, 1] before `atan2`).
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinates::new(48.8566, 2.3522);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            (Coordinates::new(48.8566, 2.3522), Coordinates::new(51.5074, -0.1278)),
            (Coordinates::new(-33.8688, 151.2093), Coordinates::new(40.7128, -74.0060)),
            (Coordinates::new(90.0, 0.0), Coordinates::new(-90.0, 45.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
        }
    }

    #[test]
    fn test_paris_to_london() {
        let paris = Coordinates::new(48.8566, 2.3522);
        let london = Coordinates::new(51.5074, -0.1278);
        assert_relative_eq!(haversine_distance(paris, london), 343_556.0, max_relative = 0.005);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);
        assert_relative_eq!(haversine_distance(a, b), PI * EARTH_RADIUS_METERS, max_relative = 1e-9);

        let north = Coordinates::new(90.0, 0.0);
        let south = Coordinates::new(-90.0, 0.0);
        assert_relative_eq!(haversine_distance(north, south), PI * EARTH_RADIUS_METERS, max_relative = 1e-9);
    }

    #[test]
    fn test_monotonic_with_separation() {
        let origin = Coordinates::new(0.0, 0.0);
        let mut previous = 0.0;
        for step in 1..=10 {
            let d = haversine_distance(origin, Coordinates::new(0.0, step as f64 * 10.0));
            assert!(d > previous);
            previous = d;
        }
    }

    #[test]
    fn test_one_degree_latitude() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        assert_relative_eq!(haversine_distance(a, b), 111_195.0, max_relative = 0.001);
    }
}

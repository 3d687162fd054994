// ABOUTME: Great-circle distance between GPS coordinates using the haversine formula
// ABOUTME: Pure function over degrees, returning meters on a spherical Earth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use crate::constants::units::EARTH_RADIUS_METERS;
use crate::models::Coordinate;

/// Great-circle distance in meters between two coordinates given in degrees
#[must_use]
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Total path length of consecutive coordinates in meters
#[must_use]
pub fn path_length(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum()
}

/// Longitude offset in degrees that spans `meters` along the equator
#[must_use]
pub fn equator_longitude_offset(meters: f64) -> f64 {
    (meters / EARTH_RADIUS_METERS).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinate::new(51.5, -0.12);
        assert!(haversine_distance(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ten_meters_east_at_equator() {
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.00009));
        assert!((d - 10.0).abs() < 0.5, "got {d}");
    }

    #[test]
    fn test_one_degree_latitude() {
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(48.8566, 2.3522);
        let b = Coordinate::new(48.8584, 2.2945);
        assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_equator_offset_inverts_distance() {
        let offset = equator_longitude_offset(42.0);
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, offset));
        assert!((d - 42.0).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn test_path_length_sums_segments() {
        let step = equator_longitude_offset(10.0);
        let points: Vec<Coordinate> = (0..4)
            .map(|i| Coordinate::new(0.0, step * f64::from(i)))
            .collect();
        assert!((path_length(&points) - 30.0).abs() < 1e-6);
        assert!(path_length(&points[..1]).abs() < f64::EPSILON);
    }
}

//! Spherical distance math and bounding-box envelopes.

use serde::Serialize;

use crate::error::CoordinateError;

/// Earth radius in miles (spherical model).
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Miles per degree of latitude, treated as constant everywhere.
pub const MILES_PER_DEGREE_LAT: f64 = 69.0;

/// A validated WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }
}

/// Great-circle distance between two coordinates using the Haversine formula.
///
/// Treats the Earth as a perfect sphere; error stays under ~0.5% for the
/// sub-1000 mile distances the optimizer works with.
///
/// # Returns
/// Distance in miles
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Axis-aligned lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat >= self.lat_min
            && point.lat <= self.lat_max
            && point.lon >= self.lon_min
            && point.lon <= self.lon_max
    }
}

/// Envelope guaranteed to contain every point within `radius_miles` of `center`.
///
/// The box is oversized on purpose; callers refine with [`haversine_miles`].
/// Longitude degrees shrink toward the poles, so the longitude half-width grows
/// as `cos(lat)` approaches zero. No antimeridian wrapping is applied.
pub fn bounding_box(center: Coordinate, radius_miles: f64) -> BoundingBox {
    let lat_delta = radius_miles / MILES_PER_DEGREE_LAT;
    let lon_delta = radius_miles / (MILES_PER_DEGREE_LAT * center.lat.to_radians().cos());

    BoundingBox {
        lat_min: center.lat - lat_delta,
        lat_max: center.lat + lat_delta,
        lon_min: center.lon - lon_delta,
        lon_max: center.lon + lon_delta,
    }
}

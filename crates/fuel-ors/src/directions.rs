//! OpenRouteService directions wire format.
//!
//! ORS speaks `[lon, lat]` everywhere; [`lon_lat_to_coordinate`] is the only
//! place that ordering is turned into a [`Coordinate`].

use fuel_core::{Coordinate, Route, RouteGeometry, RouteNotFound};
use serde::{Deserialize, Serialize};

pub const METERS_PER_MILE: f64 = 1609.344;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Serialize)]
pub(crate) struct DirectionsRequest {
    coordinates: [[f64; 2]; 2],
}

impl DirectionsRequest {
    pub(crate) fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            coordinates: [[start.lon, start.lat], [end.lon, end.lat]],
        }
    }
}

/// GeoJSON feature collection returned by `/v2/directions/{profile}/geojson`.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    geometry: LineString,
    properties: RouteProperties,
}

#[derive(Debug, Deserialize)]
struct LineString {
    /// `[lon, lat]` or `[lon, lat, elevation]`
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct RouteProperties {
    summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    /// Meters; ORS omits it for zero-length routes
    #[serde(default)]
    distance: f64,
    /// Seconds
    #[serde(default)]
    duration: f64,
}

impl DirectionsResponse {
    /// Convert the first route feature into a domain [`Route`].
    pub fn into_route(self) -> Result<Route, RouteNotFound> {
        let feature = self
            .features
            .into_iter()
            .next()
            .ok_or_else(|| RouteNotFound::new("directions response contained no route"))?;

        let points = feature
            .geometry
            .coordinates
            .iter()
            .map(|position| lon_lat_to_coordinate(position))
            .collect::<Result<Vec<_>, _>>()?;
        let geometry = RouteGeometry::new(points)
            .ok_or_else(|| RouteNotFound::new("directions response had an empty geometry"))?;

        Ok(Route {
            distance_miles: feature.properties.summary.distance / METERS_PER_MILE,
            duration_hours: feature.properties.summary.duration / SECONDS_PER_HOUR,
            geometry,
        })
    }
}

/// Normalize an ORS `[lon, lat, ...]` position.
pub fn lon_lat_to_coordinate(position: &[f64]) -> Result<Coordinate, RouteNotFound> {
    match position {
        [lon, lat, ..] => Coordinate::new(*lat, *lon)
            .map_err(|err| RouteNotFound::new(format!("invalid route coordinate: {err}"))),
        _ => Err(RouteNotFound::new(format!(
            "route position has {} values, expected at least 2",
            position.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_lon_lat_order() {
        let start = Coordinate::new(34.0522, -118.2437).unwrap();
        let end = Coordinate::new(36.1699, -115.1398).unwrap();
        let body = serde_json::to_value(DirectionsRequest::new(start, end)).unwrap();
        assert_eq!(
            body,
            json!({"coordinates": [[-118.2437, 34.0522], [-115.1398, 36.1699]]})
        );
    }

    #[test]
    fn position_is_swapped_to_lat_lon() {
        let coord = lon_lat_to_coordinate(&[-89.650148, 39.781721]).unwrap();
        assert_eq!(coord.lat, 39.781721);
        assert_eq!(coord.lon, -89.650148);

        let with_elevation = lon_lat_to_coordinate(&[-89.65, 39.78, 180.0]).unwrap();
        assert_eq!(with_elevation.lat, 39.78);

        assert!(lon_lat_to_coordinate(&[1.0]).is_err());
        // Latitude out of range once swapped
        assert!(lon_lat_to_coordinate(&[10.0, 95.0]).is_err());
    }

    #[test]
    fn response_converts_units() {
        let payload: DirectionsResponse = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[-118.2437, 34.0522], [-115.1398, 36.1699]]},
                "properties": {"summary": {"distance": 434522.0, "duration": 14400.0}}
            }]
        }))
        .unwrap();

        let route = payload.into_route().unwrap();
        assert!((route.distance_miles - 270.0).abs() < 0.01);
        assert!((route.duration_hours - 4.0).abs() < 1e-9);
        assert_eq!(route.geometry.len(), 2);
        assert_eq!(route.geometry.points()[0].lat, 34.0522);
    }

    #[test]
    fn missing_features_is_route_not_found() {
        let payload: DirectionsResponse = serde_json::from_value(json!({"type": "FeatureCollection"})).unwrap();
        let err = payload.into_route().unwrap_err();
        assert!(err.to_string().contains("no route"));
    }

    #[test]
    fn empty_geometry_is_route_not_found() {
        let payload: DirectionsResponse = serde_json::from_value(json!({
            "features": [{
                "geometry": {"coordinates": []},
                "properties": {"summary": {}}
            }]
        }))
        .unwrap();
        assert!(payload.into_route().is_err());
    }
}

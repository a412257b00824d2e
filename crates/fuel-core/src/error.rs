//! Error types shared by the optimizer and its collaborators.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// The station catalog could not be queried.
///
/// Infrastructure failure; never reported as "no stations found".
#[derive(Debug, Error)]
#[error("station catalog unavailable: {source}")]
pub struct CatalogError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl CatalogError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self { source: source.into() }
    }
}

/// The routing provider could not produce a route.
///
/// Covers network errors, timeouts, exhausted retries and empty responses.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct RouteNotFound(pub String);

impl RouteNotFound {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("route not found: {0}")]
    RouteNotFound(#[from] RouteNotFound),

    #[error(
        "no fuel stations found within {range_miles} miles of ({lat}, {lon}) that make progress toward the destination"
    )]
    InsufficientStations { lat: f64, lon: f64, range_miles: f64 },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("fuel stop search did not converge after {0} stops")]
    StopLimitExceeded(usize),

    #[error("cannot price {distance_miles} miles at {mpg} mpg")]
    FuelCost { distance_miles: f64, mpg: f64 },
}

//! Routing provider seam.

use async_trait::async_trait;

use crate::error::RouteNotFound;
use crate::geo::Coordinate;
use crate::models::Route;

/// Supplies a driving route between two coordinates.
///
/// Any failure (network, timeout, empty response) is reported as [`RouteNotFound`].
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    async fn directions(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteNotFound>;
}

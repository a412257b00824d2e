//! Station catalog access: bounding-box pre-filter plus exact distance refinement.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::CatalogError;
use crate::geo::{bounding_box, haversine_miles, BoundingBox, Coordinate};
use crate::models::FuelStation;

/// Read-only store of fuel stations.
///
/// Implementations must support concurrent readers.
#[async_trait]
pub trait StationCatalog: Send + Sync {
    /// Stations inside `bbox`, cheapest first (ties by id), at most `limit` when set.
    async fn stations_in_box(
        &self,
        bbox: &BoundingBox,
        limit: Option<usize>,
    ) -> Result<Vec<FuelStation>, CatalogError>;

    /// Catalog-wide average price, `None` when the catalog is empty.
    async fn average_price(&self) -> Result<Option<Decimal>, CatalogError>;
}

/// A station paired with its exact distance from the query center.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub station: FuelStation,
    pub distance_miles: f64,
}

/// Price-ordered stations within `radius_miles` of `center`.
///
/// Only the `limit` cheapest stations inside the envelope are refined, so a
/// cheaper station beyond the cap is never seen.
pub async fn find_candidates(
    catalog: &dyn StationCatalog,
    center: Coordinate,
    radius_miles: f64,
    limit: usize,
) -> Result<Vec<Candidate>, CatalogError> {
    let bbox = bounding_box(center, radius_miles);
    let stations = catalog.stations_in_box(&bbox, Some(limit)).await?;
    Ok(refine(stations, center, 0.0, radius_miles))
}

/// Price-ordered stations whose distance from `center` lies in `[min_miles, max_miles]`.
pub async fn find_in_window(
    catalog: &dyn StationCatalog,
    center: Coordinate,
    min_miles: f64,
    max_miles: f64,
) -> Result<Vec<Candidate>, CatalogError> {
    let bbox = bounding_box(center, max_miles);
    let stations = catalog.stations_in_box(&bbox, None).await?;
    Ok(refine(stations, center, min_miles, max_miles))
}

fn refine(stations: Vec<FuelStation>, center: Coordinate, min_miles: f64, max_miles: f64) -> Vec<Candidate> {
    stations
        .into_iter()
        .filter_map(|station| {
            let distance_miles = haversine_miles(center, station.location);
            (distance_miles >= min_miles && distance_miles <= max_miles).then_some(Candidate {
                station,
                distance_miles,
            })
        })
        .collect()
}

/// Snapshot catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    stations: Vec<FuelStation>,
}

impl InMemoryCatalog {
    pub fn new(mut stations: Vec<FuelStation>) -> Self {
        stations.sort_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)));
        Self { stations }
    }
}

#[async_trait]
impl StationCatalog for InMemoryCatalog {
    async fn stations_in_box(
        &self,
        bbox: &BoundingBox,
        limit: Option<usize>,
    ) -> Result<Vec<FuelStation>, CatalogError> {
        let matching = self
            .stations
            .iter()
            .filter(|station| bbox.contains(station.location))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(matching)
    }

    async fn average_price(&self) -> Result<Option<Decimal>, CatalogError> {
        if self.stations.is_empty() {
            return Ok(None);
        }
        let total: Decimal = self.stations.iter().map(|s| s.price).sum();
        Ok(Some(total / Decimal::from(self.stations.len())))
    }
}

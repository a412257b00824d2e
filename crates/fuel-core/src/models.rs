//! Core data models for route planning and fuel stops.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::geo::{haversine_miles, Coordinate};

/// A fuel station as stored in the catalog. Read-only from the optimizer's side.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelStation {
    pub id: i64,
    pub name: String,
    /// Street address
    pub address: String,
    pub city: String,
    /// Two-letter state/region code
    pub state: String,
    /// Retail price per gallon
    pub price: Decimal,
    pub location: Coordinate,
}

impl FuelStation {
    /// "street, city, ST"
    pub fn full_address(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.state)
    }
}

impl fmt::Display for FuelStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}, {}", self.name, self.city, self.state)
    }
}

/// Ordered, non-empty path from start to end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteGeometry(Vec<Coordinate>);

impl RouteGeometry {
    /// Returns `None` for an empty point list.
    pub fn new(points: Vec<Coordinate>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self(points))
        }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// On-route distance from each point to the last one, following the path.
    ///
    /// `remaining[i]` is the sum of the legs `i -> i+1 -> ... -> n-1`.
    pub fn remaining_distances(&self) -> Vec<f64> {
        let mut remaining = vec![0.0; self.0.len()];
        for i in (0..self.0.len().saturating_sub(1)).rev() {
            remaining[i] = remaining[i + 1] + haversine_miles(self.0[i], self.0[i + 1]);
        }
        remaining
    }

    /// Index of the point closest to `target`. Ties go to the first occurrence.
    // Linear scan; a k-d tree over the points would give the same answer.
    pub fn nearest_index(&self, target: Coordinate) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for (idx, point) in self.0.iter().enumerate() {
            let dist = haversine_miles(*point, target);
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        best_idx
    }
}

/// A driving route as produced by the routing provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub geometry: RouteGeometry,
}

/// A selected refuel point, snapshotting the station at selection time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelStop {
    #[serde(skip)]
    pub station_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Cumulative miles from the route start
    pub distance_from_start: f64,
}

impl FuelStop {
    pub fn from_station(station: &FuelStation, distance_from_start: f64) -> Self {
        Self {
            station_id: station.id,
            name: station.name.clone(),
            address: station.full_address(),
            city: station.city.clone(),
            state: station.state.clone(),
            lat: station.location.lat,
            lon: station.location.lon,
            price: station.price,
            distance_from_start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    DriverFatigueWarning,
}

/// Alternate stop suggested for driver rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyStop {
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Miles from the position the leg starts at
    pub distance_miles: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_stop: Option<SafetyStop>,
}

/// Optimizer output for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub route: Route,
    pub fuel_stops: Vec<FuelStop>,
    pub safety_insights: Vec<SafetyInsight>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    pub total_distance_miles: f64,
}

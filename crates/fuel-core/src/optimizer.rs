//! Fuel stop optimization along a driving route.
//!
//! Walks the route geometry, refuels whenever the rest of the route is out of
//! range, and picks the cheapest in-range station that moves the vehicle
//! closer to the destination. The choice is greedy per stop: no lookahead and
//! no global cost minimization.

use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

use crate::catalog::{find_candidates, Candidate, StationCatalog};
use crate::error::OptimizeError;
use crate::geo::{haversine_miles, Coordinate};
use crate::models::{FuelStop, RouteGeometry, RoutePlan, SafetyInsight};
use crate::routing::RoutingProvider;
use crate::safety::{advisory_insight, fatigue_insight, SafetyRules};

/// Vehicle and search parameters.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Distance the vehicle covers on a full tank
    pub max_range_miles: f64,
    /// Fuel efficiency, miles per gallon
    pub mpg: f64,
    /// Cheapest stations refined per stop search
    pub candidate_limit: usize,
    /// Price used when the catalog has no stations
    pub fallback_price: Decimal,
    /// Upper bound on stops before giving up
    pub max_stops: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_range_miles: 500.0,
            mpg: 10.0,
            candidate_limit: 100,
            fallback_price: Decimal::new(350, 2),
            max_stops: 64,
        }
    }
}

/// Stops and insights produced by one walk of the route.
#[derive(Debug, Default)]
struct Segmentation {
    stops: Vec<FuelStop>,
    insights: Vec<SafetyInsight>,
}

pub struct RouteOptimizer {
    routing: Arc<dyn RoutingProvider>,
    catalog: Arc<dyn StationCatalog>,
    config: OptimizerConfig,
    rules: SafetyRules,
}

impl RouteOptimizer {
    pub fn new(
        routing: Arc<dyn RoutingProvider>,
        catalog: Arc<dyn StationCatalog>,
        config: OptimizerConfig,
    ) -> Self {
        Self {
            routing,
            catalog,
            config,
            rules: SafetyRules::default(),
        }
    }

    /// Plan fuel stops for a trip from `start` to `end`.
    pub async fn optimize(&self, start: Coordinate, end: Coordinate) -> Result<RoutePlan, OptimizeError> {
        let route = self.routing.directions(start, end).await?;
        let total_distance = route.distance_miles;

        let segmentation = if total_distance <= self.config.max_range_miles {
            Segmentation::default()
        } else {
            self.find_fuel_stops(start, end, &route.geometry).await?
        };

        let Segmentation { stops, mut insights } = segmentation;
        if stops.is_empty() {
            insights.extend(advisory_insight(&self.rules, total_distance));
        }

        let avg_price = if stops.is_empty() {
            self.catalog_average_price().await?
        } else {
            stops.iter().map(|s| s.price).sum::<Decimal>() / Decimal::from(stops.len())
        };
        let total_cost = self.fuel_cost(total_distance, avg_price)?;

        tracing::info!(
            "Planned {:.1} mile route with {} fuel stops, {} safety insights, estimated cost {}",
            total_distance,
            stops.len(),
            insights.len(),
            total_cost
        );

        Ok(RoutePlan {
            route,
            fuel_stops: stops,
            safety_insights: insights,
            total_cost,
            total_distance_miles: total_distance,
        })
    }

    async fn find_fuel_stops(
        &self,
        start: Coordinate,
        end: Coordinate,
        geometry: &RouteGeometry,
    ) -> Result<Segmentation, OptimizeError> {
        let max_range = self.config.max_range_miles;
        let remaining = geometry.remaining_distances();

        let mut segmentation = Segmentation::default();
        let mut position = start;
        let mut index = 0usize;
        let mut traveled = 0.0;

        while remaining[index] > max_range {
            if segmentation.stops.len() >= self.config.max_stops {
                return Err(OptimizeError::StopLimitExceeded(self.config.max_stops));
            }

            let Some(Candidate { station, distance_miles: leg }) =
                self.select_station(position, end).await?
            else {
                tracing::warn!(
                    "No station within {} miles of ({}, {}) makes progress toward the destination",
                    max_range,
                    position.lat,
                    position.lon
                );
                return Err(OptimizeError::InsufficientStations {
                    lat: position.lat,
                    lon: position.lon,
                    range_miles: max_range,
                });
            };

            if let Some(insight) =
                fatigue_insight(self.catalog.as_ref(), &self.rules, position, leg, &station).await?
            {
                segmentation.insights.push(insight);
            }

            traveled += leg;
            tracing::debug!("Fuel stop {} at {:.1} miles ({})", station, traveled, station.price);
            segmentation.stops.push(FuelStop::from_station(&station, traveled));

            position = station.location;
            index = geometry.nearest_index(position);
        }

        Ok(segmentation)
    }

    /// Cheapest in-range station that is strictly closer to `end` than `position`.
    async fn select_station(
        &self,
        position: Coordinate,
        end: Coordinate,
    ) -> Result<Option<Candidate>, OptimizeError> {
        let candidates = find_candidates(
            self.catalog.as_ref(),
            position,
            self.config.max_range_miles,
            self.config.candidate_limit,
        )
        .await?;

        let current_to_end = haversine_miles(position, end);
        Ok(candidates
            .into_iter()
            .find(|c| haversine_miles(c.station.location, end) < current_to_end))
    }

    async fn catalog_average_price(&self) -> Result<Decimal, OptimizeError> {
        Ok(self
            .catalog
            .average_price()
            .await?
            .unwrap_or(self.config.fallback_price))
    }

    /// Gallons for the whole route times `avg_price`, rounded to cents.
    fn fuel_cost(&self, distance_miles: f64, avg_price: Decimal) -> Result<Decimal, OptimizeError> {
        let mpg = self.config.mpg;
        let gallons = (mpg.is_finite() && mpg > 0.0 && distance_miles >= 0.0)
            .then(|| Decimal::from_f64_retain(distance_miles / mpg))
            .flatten()
            .ok_or(OptimizeError::FuelCost { distance_miles, mpg })?;
        Ok((gallons * avg_price).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

//! Driver fatigue rules and rest-stop recommendations.
//!
//! Runs alongside cost optimization: a leg long enough to trip the fatigue
//! threshold gets an alternate, possibly pricier, stop suggested inside a
//! fixed distance window.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::{find_in_window, StationCatalog};
use crate::error::CatalogError;
use crate::geo::Coordinate;
use crate::models::{FuelStation, InsightKind, SafetyInsight, SafetyStop};

/// Thresholds for fatigue detection.
#[derive(Debug, Clone)]
pub struct SafetyRules {
    /// Leg length (miles) at which a warning is considered
    pub fatigue_threshold_miles: f64,
    /// Far edge of the rest-stop search window (miles)
    pub window_max_miles: f64,
    /// Assumed highway speed used to estimate driving hours
    pub average_speed_mph: f64,
}

impl Default for SafetyRules {
    fn default() -> Self {
        Self {
            fatigue_threshold_miles: 220.0,
            window_max_miles: 260.0,
            average_speed_mph: 60.0,
        }
    }
}

impl SafetyRules {
    pub fn driving_hours(&self, miles: f64) -> f64 {
        miles / self.average_speed_mph
    }
}

/// Recommend a rest stop for a leg from `position` to the cost-optimal `chosen` station.
///
/// Returns `None` when the leg is under the threshold, the window holds no
/// station, or the cheapest station in the window is `chosen` itself.
pub async fn fatigue_insight(
    catalog: &dyn StationCatalog,
    rules: &SafetyRules,
    position: Coordinate,
    leg_miles: f64,
    chosen: &FuelStation,
) -> Result<Option<SafetyInsight>, CatalogError> {
    if leg_miles < rules.fatigue_threshold_miles {
        return Ok(None);
    }

    let window = find_in_window(
        catalog,
        position,
        rules.fatigue_threshold_miles,
        rules.window_max_miles,
    )
    .await?;

    let Some(best) = window.into_iter().next() else {
        return Ok(None);
    };
    if best.station.id == chosen.id {
        return Ok(None);
    }

    let delta = price_delta_percent(best.station.price, chosen.price);
    let message = format!(
        "Reaching {}, {} means about {:.1} hours ({:.0} miles) of continuous driving. \
         Consider a rest stop at {} in {}, {} ({}% price difference vs. the optimal stop).",
        chosen.city,
        chosen.state,
        rules.driving_hours(leg_miles),
        leg_miles,
        best.station.name,
        best.station.city,
        best.station.state,
        signed(delta),
    );

    Ok(Some(SafetyInsight {
        kind: InsightKind::DriverFatigueWarning,
        message,
        safety_stop: Some(SafetyStop {
            name: best.station.name,
            city: best.station.city,
            state: best.station.state,
            price: best.station.price,
            distance_miles: best.distance_miles,
        }),
    }))
}

/// Advisory for a trip that needs no refuel but still exceeds the fatigue threshold.
pub fn advisory_insight(rules: &SafetyRules, total_miles: f64) -> Option<SafetyInsight> {
    if total_miles < rules.fatigue_threshold_miles {
        return None;
    }
    Some(SafetyInsight {
        kind: InsightKind::DriverFatigueWarning,
        message: format!(
            "This trip is about {:.1} hours ({:.0} miles) of continuous driving with no fuel stop required. \
             Plan a rest break along the way.",
            rules.driving_hours(total_miles),
            total_miles,
        ),
        safety_stop: None,
    })
}

/// Percentage difference of `safety` over `optimal`, one decimal place.
///
/// Positive means the safety stop costs more.
pub fn price_delta_percent(safety: Decimal, optimal: Decimal) -> Decimal {
    if optimal.is_zero() {
        return Decimal::ZERO;
    }
    ((safety - optimal) / optimal * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn signed(delta: Decimal) -> String {
    if delta > Decimal::ZERO {
        format!("+{delta:.1}")
    } else {
        format!("{delta:.1}")
    }
}

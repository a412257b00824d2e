//! Plain-text rendering of a route plan response.

use serde_json::Value;
use std::fmt;

/// Terminal view of the optimizer's JSON plan.
pub struct PlanReport<'a>(pub &'a Value);

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;

        writeln!(
            f,
            "Route: {:.1} miles, {:.1} hours",
            plan["total_distance_miles"].as_f64().unwrap_or_default(),
            plan["route"]["duration_hours"].as_f64().unwrap_or_default()
        )?;

        let stops = plan["fuel_stops"].as_array().map(Vec::as_slice).unwrap_or_default();
        if stops.is_empty() {
            writeln!(f, "No fuel stops needed")?;
        } else {
            writeln!(f, "Fuel stops:")?;
            for (i, stop) in stops.iter().enumerate() {
                writeln!(
                    f,
                    "  {}. {} ({}) at mile {:.1}, ${:.3}/gal",
                    i + 1,
                    stop["name"].as_str().unwrap_or("?"),
                    stop["address"].as_str().unwrap_or("?"),
                    stop["distance_from_start"].as_f64().unwrap_or_default(),
                    stop["price"].as_f64().unwrap_or_default(),
                )?;
            }
        }

        for insight in plan["safety_insights"].as_array().into_iter().flatten() {
            writeln!(f, "Safety: {}", insight["message"].as_str().unwrap_or(""))?;
        }

        writeln!(
            f,
            "Estimated fuel cost: ${:.2}",
            plan["total_cost"].as_f64().unwrap_or_default()
        )
    }
}

/// Render the optimizer's JSON plan for a terminal.
pub fn format_plan(plan: &Value) -> String {
    PlanReport(plan).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_stops_insights_and_cost() {
        let plan = json!({
            "route": {"distance_miles": 622.0, "duration_hours": 10.4, "geometry": []},
            "fuel_stops": [
                {"name": "Alpha", "address": "1 Main St, Omaha, NE", "price": 3.199, "distance_from_start": 138.2}
            ],
            "safety_insights": [
                {"type": "DRIVER_FATIGUE_WARNING", "message": "Take a break"}
            ],
            "total_cost": 198.93,
            "total_distance_miles": 622.0
        });

        let text = format_plan(&plan);
        assert!(text.contains("Route: 622.0 miles, 10.4 hours"));
        assert!(text.contains("1. Alpha (1 Main St, Omaha, NE) at mile 138.2, $3.199/gal"));
        assert!(text.contains("Safety: Take a break"));
        assert!(text.ends_with("Estimated fuel cost: $198.93\n"));
    }

    #[test]
    fn renders_plan_without_stops() {
        let plan = json!({
            "route": {"duration_hours": 3.0},
            "fuel_stops": [],
            "safety_insights": [],
            "total_cost": 70.0,
            "total_distance_miles": 200.0
        });

        let text = format_plan(&plan);
        assert!(text.contains("No fuel stops needed"));
        assert!(!text.contains("Safety:"));
    }
}

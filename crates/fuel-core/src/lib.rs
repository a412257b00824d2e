pub mod catalog;
pub mod error;
pub mod geo;
pub mod models;
pub mod optimizer;
pub mod routing;
pub mod safety;

pub use catalog::{find_candidates, find_in_window, Candidate, InMemoryCatalog, StationCatalog};
pub use error::{CatalogError, CoordinateError, OptimizeError, RouteNotFound};
pub use geo::{bounding_box, haversine_miles, BoundingBox, Coordinate};
pub use models::{
    FuelStation, FuelStop, InsightKind, Route, RouteGeometry, RoutePlan, SafetyInsight, SafetyStop,
};
pub use optimizer::{OptimizerConfig, RouteOptimizer};
pub use routing::RoutingProvider;
pub use safety::SafetyRules;

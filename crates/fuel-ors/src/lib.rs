//! Fuel ORS - OpenRouteService routing provider
//!
//! Fetches driving routes and normalizes them into the core route model.

pub mod client;
pub mod directions;
pub mod retry;

pub use client::{OrsClient, OrsConfig};
pub use directions::lon_lat_to_coordinate;
pub use retry::RetryPolicy;

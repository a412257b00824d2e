//! Shared application state.

use fuel_core::RouteOptimizer;

/// Application state handed to every handler.
pub struct AppState {
    optimizer: RouteOptimizer,
}

impl AppState {
    pub fn new(optimizer: RouteOptimizer) -> Self {
        Self { optimizer }
    }

    pub fn optimizer(&self) -> &RouteOptimizer {
        &self.optimizer
    }
}

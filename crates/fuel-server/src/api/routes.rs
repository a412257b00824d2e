//! REST API routes.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{optimize, request_id};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/optimize-route", post(optimize::optimize_route))
        .layer(middleware::from_fn(request_id::ensure_request_id))
}

async fn health() -> &'static str {
    "OK"
}

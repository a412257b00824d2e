//! Route optimization endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fuel_core::{Coordinate, OptimizeError, RoutePlan};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::state::AppState;

/// Field name to validation messages.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRouteRequest {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
}

impl OptimizeRouteRequest {
    /// Check ranges and that the endpoints differ.
    pub fn validate(&self) -> Result<(Coordinate, Coordinate), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_latitude(&mut errors, "start_lat", self.start_lat);
        check_longitude(&mut errors, "start_lon", self.start_lon);
        check_latitude(&mut errors, "end_lat", self.end_lat);
        check_longitude(&mut errors, "end_lon", self.end_lon);

        if errors.is_empty() && self.start_lat == self.end_lat && self.start_lon == self.end_lon {
            errors
                .entry("coordinates")
                .or_default()
                .push("Start and end coordinates cannot be the same".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let start = Coordinate::new(self.start_lat, self.start_lon).map_err(single_error)?;
        let end = Coordinate::new(self.end_lat, self.end_lon).map_err(single_error)?;
        Ok((start, end))
    }
}

fn check_latitude(errors: &mut FieldErrors, field: &'static str, value: f64) {
    if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
        errors
            .entry(field)
            .or_default()
            .push("Ensure this value is a finite number between -90 and 90".to_string());
    }
}

fn check_longitude(errors: &mut FieldErrors, field: &'static str, value: f64) {
    if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
        errors
            .entry(field)
            .or_default()
            .push("Ensure this value is a finite number between -180 and 180".to_string());
    }
}

fn single_error(err: impl std::fmt::Display) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert("coordinates", vec![err.to_string()]);
    errors
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    MalformedBody(String),

    #[error("invalid coordinates")]
    Validation(FieldErrors),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedBody(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request", "details": details }),
            ),
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request", "details": fields }),
            ),
            ApiError::Optimize(OptimizeError::RouteNotFound(reason)) => {
                tracing::warn!("Route lookup failed: {}", reason);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "error": format!("Route not found: {}", reason) }),
                )
            }
            ApiError::Optimize(err @ OptimizeError::InsufficientStations { .. }) => {
                tracing::warn!("Trip infeasible: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("Insufficient fuel stations: {}", err) }),
                )
            }
            ApiError::Optimize(err) => {
                tracing::error!("Optimization failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("Internal server error: {}", err) }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// POST /api/v1/optimize-route
pub async fn optimize_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OptimizeRouteRequest>, JsonRejection>,
) -> Result<Json<RoutePlan>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    let (start, end) = request.validate().map_err(ApiError::Validation)?;

    tracing::debug!(
        "Optimizing route ({}, {}) -> ({}, {})",
        start.lat,
        start.lon,
        end.lat,
        end.lon
    );

    let plan = state.optimizer().optimize(start, end).await?;
    Ok(Json(plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start_lat: f64, start_lon: f64, end_lat: f64, end_lon: f64) -> OptimizeRouteRequest {
        OptimizeRouteRequest {
            start_lat,
            start_lon,
            end_lat,
            end_lon,
        }
    }

    #[test]
    fn accepts_valid_coordinates() {
        let (start, end) = request(34.0522, -118.2437, 36.1699, -115.1398)
            .validate()
            .unwrap();
        assert_eq!(start.lat, 34.0522);
        assert_eq!(end.lon, -115.1398);
    }

    #[test]
    fn boundary_values_are_valid() {
        assert!(request(90.0, 180.0, -90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn reports_every_bad_field() {
        let errors = request(91.0, -181.0, f64::NAN, 0.0).validate().unwrap_err();
        assert!(errors.contains_key("start_lat"));
        assert!(errors.contains_key("start_lon"));
        assert!(errors.contains_key("end_lat"));
        assert!(!errors.contains_key("end_lon"));
    }

    #[test]
    fn rejects_identical_endpoints() {
        let errors = request(40.0, -100.0, 40.0, -100.0).validate().unwrap_err();
        assert_eq!(
            errors["coordinates"],
            vec!["Start and end coordinates cannot be the same".to_string()]
        );
    }

    #[test]
    fn error_statuses() {
        let not_found = ApiError::from(OptimizeError::RouteNotFound(
            fuel_core::RouteNotFound::new("no route"),
        ));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let infeasible = ApiError::from(OptimizeError::InsufficientStations {
            lat: 40.0,
            lon: -100.0,
            range_miles: 500.0,
        });
        assert_eq!(
            infeasible.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let unpriced = ApiError::from(OptimizeError::FuelCost {
            distance_miles: 270.0,
            mpg: 0.0,
        });
        assert_eq!(
            unpriced.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let stuck = ApiError::from(OptimizeError::StopLimitExceeded(64));
        assert_eq!(stuck.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let invalid = ApiError::MalformedBody("missing field `end_lon`".to_string());
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }
}

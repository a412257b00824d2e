use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use fuel_core::{
    Coordinate, OptimizerConfig, Route, RouteGeometry, RouteNotFound, RouteOptimizer,
    RoutingProvider,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::api::request_id::REQUEST_ID_HEADER;
use crate::persistence::{self, NewStation, SqliteCatalog};
use crate::{api, config::Config, state::AppState};

/// Straight north-south drive along longitude -100 from 35N to 44N.
const START: (f64, f64) = (35.0, -100.0);
const END: (f64, f64) = (44.0, -100.0);

enum StubRouting {
    Line { distance_miles: f64 },
    Unroutable,
}

#[async_trait]
impl RoutingProvider for StubRouting {
    async fn directions(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteNotFound> {
        match self {
            StubRouting::Line { distance_miles } => {
                let steps = 10;
                let points = (0..=steps)
                    .map(|i| {
                        let t = i as f64 / steps as f64;
                        Coordinate::new(
                            start.lat + (end.lat - start.lat) * t,
                            start.lon + (end.lon - start.lon) * t,
                        )
                        .unwrap()
                    })
                    .collect();
                Ok(Route {
                    distance_miles: *distance_miles,
                    duration_hours: distance_miles / 60.0,
                    geometry: RouteGeometry::new(points).unwrap(),
                })
            }
            StubRouting::Unroutable => Err(RouteNotFound::new("Could not find routable point")),
        }
    }
}

async fn setup_app(routing: StubRouting, stations: &[(&str, Decimal, f64)]) -> axum::Router {
    let mut config = Config::from_env().expect("config");
    config.database_path = std::env::temp_dir()
        .join(format!("fuel-test-{}.db", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();

    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await
        .expect("init db");
    for (name, price, lat) in stations {
        let station = NewStation {
            name: name.to_string(),
            address: "I-83 Exit 12".to_string(),
            city: format!("{name} City"),
            state: "NE".to_string(),
            price: *price,
            location: Coordinate::new(*lat, START.1).unwrap(),
        };
        persistence::insert_station(db.pool(), &station)
            .await
            .expect("insert station");
    }

    let optimizer = RouteOptimizer::new(
        Arc::new(routing),
        Arc::new(SqliteCatalog::new(db.pool().clone())),
        OptimizerConfig {
            max_range_miles: 300.0,
            ..config.optimizer_config()
        },
    );
    let state = Arc::new(AppState::new(optimizer));
    api::routes().with_state(state)
}

fn optimize_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/optimize-route")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn trip() -> Value {
    json!({
        "start_lat": START.0,
        "start_lon": START.1,
        "end_lat": END.0,
        "end_lon": END.1
    })
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn plans_cheapest_stops_along_long_route() {
    let app = setup_app(
        StubRouting::Line { distance_miles: 622.0 },
        &[
            ("Alpha", dec!(3.20), 37.0),
            ("Bravo", dec!(3.60), 38.5),
            ("Charlie", dec!(3.10), 40.5),
            ("Delta", dec!(3.90), 42.0),
        ],
    )
    .await;

    let response = app.oneshot(optimize_request(trip())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let body = read_json(response).await;
    let stops = body["fuel_stops"].as_array().expect("fuel stops");
    let names: Vec<&str> = stops.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Alpha", "Charlie"]);

    assert_eq!(stops[0]["address"], "I-83 Exit 12, Alpha City, NE");
    assert_eq!(stops[0]["price"], 3.2);
    assert!(stops[0].get("station_id").is_none());
    let first = stops[0]["distance_from_start"].as_f64().unwrap();
    let second = stops[1]["distance_from_start"].as_f64().unwrap();
    assert!(first > 0.0 && second > first);

    assert_eq!(body["total_distance_miles"], 622.0);
    assert!(body["total_cost"].as_f64().unwrap() > 0.0);
    assert_eq!(body["safety_insights"], json!([]));
    assert_eq!(body["route"]["geometry"][0], json!({"lat": 35.0, "lon": -100.0}));
}

#[tokio::test]
async fn short_route_uses_fallback_price() {
    let app = setup_app(StubRouting::Line { distance_miles: 200.0 }, &[]).await;

    let response = app.oneshot(optimize_request(trip())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["fuel_stops"], json!([]));
    // 20 gallons at the 3.50 fallback
    assert_eq!(body["total_cost"], 70.0);
}

#[tokio::test]
async fn invalid_coordinates_are_rejected() {
    let app = setup_app(StubRouting::Line { distance_miles: 100.0 }, &[]).await;

    let response = app
        .oneshot(optimize_request(json!({
            "start_lat": 95.0,
            "start_lon": -100.0,
            "end_lat": 44.0,
            "end_lon": -200.0
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Invalid request");
    assert!(body["details"]["start_lat"].is_array());
    assert!(body["details"]["end_lon"].is_array());
}

#[tokio::test]
async fn identical_endpoints_are_rejected() {
    let app = setup_app(StubRouting::Line { distance_miles: 100.0 }, &[]).await;

    let response = app
        .oneshot(optimize_request(json!({
            "start_lat": 40.0,
            "start_lon": -100.0,
            "end_lat": 40.0,
            "end_lon": -100.0
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = setup_app(StubRouting::Line { distance_miles: 100.0 }, &[]).await;

    let response = app
        .oneshot(optimize_request(json!({"start_lat": 40.0, "start_lon": -100.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Invalid request");
    assert!(body["details"].as_str().unwrap().contains("end_lat"));
}

#[tokio::test]
async fn unroutable_trip_is_not_found() {
    let app = setup_app(StubRouting::Unroutable, &[]).await;

    let response = app.oneshot(optimize_request(trip())).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Route not found: Could not find routable point");
}

#[tokio::test]
async fn empty_catalog_on_long_route_is_server_error() {
    let app = setup_app(StubRouting::Line { distance_miles: 622.0 }, &[]).await;

    let response = app.oneshot(optimize_request(trip())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Insufficient fuel stations: "));
}

#[tokio::test]
async fn health_and_request_id_passthrough() {
    let app = setup_app(StubRouting::Unroutable, &[]).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "trace-abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-abc");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

//! OpenRouteService HTTP client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use fuel_core::{Coordinate, Route, RouteNotFound, RoutingProvider};
use reqwest::Client;
use std::time::Duration;

use crate::directions::{DirectionsRequest, DirectionsResponse};
use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_PROFILE: &str = "driving-car";

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub api_key: String,
    /// ORS routing profile, e.g. `driving-car` or `driving-hgv`
    pub profile: String,
    /// Connect + read timeout per attempt
    pub timeout: Duration,
}

impl OrsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the ORS directions API.
pub struct OrsClient {
    client: Client,
    config: OrsConfig,
    retry: RetryPolicy,
}

impl OrsClient {
    pub fn new(config: OrsConfig, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            config,
            retry,
        })
    }

    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}/geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }

    /// Request a driving route, retrying throttled and transient server responses.
    pub async fn fetch_directions(&self, start: Coordinate, end: Coordinate) -> Result<Route> {
        let url = self.directions_url();
        let body = DirectionsRequest::new(start, end);
        let mut retries = 0;

        loop {
            tracing::debug!("Requesting directions from {} (attempt {})", url, retries + 1);
            let response = self
                .client
                .post(&url)
                .header("Authorization", &self.config.api_key)
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
                .context("Failed to send directions request")?;

            let status = response.status();
            if status.is_success() {
                let payload = response
                    .json::<DirectionsResponse>()
                    .await
                    .context("Failed to parse directions response")?;
                return Ok(payload.into_route()?);
            }

            if self.retry.should_retry(status.as_u16(), retries) {
                let delay = self.retry.delay_for(retries);
                tracing::warn!(
                    "Directions request returned {}, retrying in {:?} ({}/{})",
                    status,
                    delay,
                    retries + 1,
                    self.retry.max_retries
                );
                tokio::time::sleep(delay).await;
                retries += 1;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Directions request failed: {} {}",
                status,
                body
            ));
        }
    }
}

#[async_trait]
impl RoutingProvider for OrsClient {
    async fn directions(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteNotFound> {
        self.fetch_directions(start, end).await.map_err(|err| {
            tracing::warn!("Routing provider failed: {:#}", err);
            RouteNotFound::new(format!("{:#}", err))
        })
    }
}

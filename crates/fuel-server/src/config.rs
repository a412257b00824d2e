//! Server configuration from environment.

use anyhow::{bail, Result};
use fuel_core::OptimizerConfig;
use fuel_ors::{OrsConfig, RetryPolicy};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub ors_api_key: String,
    pub ors_base_url: String,
    pub ors_profile: String,
    pub ors_timeout_s: u64,
    pub ors_max_retries: u32,
    pub ors_backoff_ms: u64,
    /// Miles on a full tank
    pub effective_range_miles: f64,
    pub mpg: f64,
    pub station_candidate_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server_port: parse_env("FUEL_PORT", 3000),
            database_path: env::var("FUEL_DATABASE_PATH")
                .unwrap_or_else(|_| "data/fuel.db".to_string()),
            database_max_connections: parse_env("FUEL_DATABASE_MAX_CONNECTIONS", 5),
            ors_api_key: env::var("OPENROUTESERVICE_API_KEY").unwrap_or_default(),
            ors_base_url: env::var("ORS_BASE_URL")
                .unwrap_or_else(|_| fuel_ors::client::DEFAULT_BASE_URL.to_string()),
            ors_profile: env::var("ORS_PROFILE")
                .unwrap_or_else(|_| fuel_ors::client::DEFAULT_PROFILE.to_string()),
            ors_timeout_s: parse_env("ORS_TIMEOUT_S", 10),
            ors_max_retries: parse_env("ORS_MAX_RETRIES", 3),
            ors_backoff_ms: parse_env("ORS_BACKOFF_MS", 500),
            effective_range_miles: parse_env("EFFECTIVE_RANGE_MILES", 500.0),
            mpg: parse_env("MPG", 10.0),
            station_candidate_limit: parse_env("STATION_CANDIDATE_LIMIT", 100),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject vehicle settings that would make every plan meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.effective_range_miles.is_finite() && self.effective_range_miles > 0.0) {
            bail!(
                "EFFECTIVE_RANGE_MILES must be a positive number, got {}",
                self.effective_range_miles
            );
        }
        if !(self.mpg.is_finite() && self.mpg > 0.0) {
            bail!("MPG must be a positive number, got {}", self.mpg);
        }
        Ok(())
    }

    pub fn ors_config(&self) -> OrsConfig {
        OrsConfig {
            base_url: self.ors_base_url.clone(),
            api_key: self.ors_api_key.clone(),
            profile: self.ors_profile.clone(),
            timeout: Duration::from_secs(self.ors_timeout_s.max(1)),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.ors_max_retries,
            backoff_base: Duration::from_millis(self.ors_backoff_ms),
            ..RetryPolicy::default()
        }
    }

    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            max_range_miles: self.effective_range_miles,
            mpg: self.mpg,
            candidate_limit: self.station_candidate_limit.max(1),
            ..OptimizerConfig::default()
        }
    }
}

/// Parse `key`, falling back to `default` when unset or malformed.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

//! CLI tool to request a fuel plan from the Fuel Server.

use anyhow::{Context, Result};
use clap::Parser;
use fuel_cli::report::format_plan;
use serde_json::{json, Value};

/// Plan cost-optimal fuel stops between two points
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Fuel Server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Start latitude (default: Los Angeles)
    #[arg(long, default_value_t = 34.0522, allow_hyphen_values = true)]
    start_lat: f64,

    /// Start longitude
    #[arg(long, default_value_t = -118.2437, allow_hyphen_values = true)]
    start_lon: f64,

    /// End latitude (default: New York)
    #[arg(long, default_value_t = 40.7128, allow_hyphen_values = true)]
    end_lat: f64,

    /// End longitude
    #[arg(long, default_value_t = -74.0060, allow_hyphen_values = true)]
    end_lon: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let endpoint = format!("{}/api/v1/optimize-route", args.url.trim_end_matches('/'));
    println!("Requesting plan from {}...", endpoint);
    println!(
        "  ({}, {}) -> ({}, {})",
        args.start_lat, args.start_lon, args.end_lat, args.end_lon
    );
    println!();

    let response = reqwest::Client::new()
        .post(&endpoint)
        .json(&json!({
            "start_lat": args.start_lat,
            "start_lon": args.start_lon,
            "end_lat": args.end_lat,
            "end_lon": args.end_lon,
        }))
        .send()
        .await
        .context("Failed to reach Fuel Server")?;

    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("Failed to parse server response")?;

    if !status.is_success() {
        eprintln!("Server returned {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&body)?);
        anyhow::bail!("route planning failed with status {}", status);
    }

    print!("{}", format_plan(&body));
    Ok(())
}

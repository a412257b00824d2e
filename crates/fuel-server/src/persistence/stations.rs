//! Fuel station catalog backed by SQLite.

use anyhow::Result;
use async_trait::async_trait;
use fuel_core::{BoundingBox, CatalogError, Coordinate, FuelStation, StationCatalog};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::str::FromStr;

/// Station fields for insertion; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewStation {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub price: Decimal,
    pub location: Coordinate,
}

/// Insert a station and return its id.
pub async fn insert_station(pool: &SqlitePool, station: &NewStation) -> Result<i64> {
    if station.price <= Decimal::ZERO {
        anyhow::bail!("station price must be positive, got {}", station.price);
    }

    let result = sqlx::query(
        r#"
        INSERT INTO fuel_stations (truckstop_name, address, city, state, retail_price, latitude, longitude)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&station.name)
    .bind(&station.address)
    .bind(&station.city)
    .bind(station.state.to_uppercase())
    .bind(station.price.to_string())
    .bind(station.location.lat)
    .bind(station.location.lon)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Number of stations in the catalog.
pub async fn count_stations(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fuel_stations")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// [`StationCatalog`] over the `fuel_stations` table.
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StationCatalog for SqliteCatalog {
    async fn stations_in_box(
        &self,
        bbox: &BoundingBox,
        limit: Option<usize>,
    ) -> Result<Vec<FuelStation>, CatalogError> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit
            .map(|value| i64::try_from(value).unwrap_or(i64::MAX))
            .unwrap_or(-1);

        let rows = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, truckstop_name, address, city, state, retail_price, latitude, longitude
            FROM fuel_stations
            WHERE latitude BETWEEN ?1 AND ?2
              AND longitude BETWEEN ?3 AND ?4
            ORDER BY CAST(retail_price AS REAL), id
            LIMIT ?5
            "#,
        )
        .bind(bbox.lat_min)
        .bind(bbox.lat_max)
        .bind(bbox.lon_min)
        .bind(bbox.lon_max)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(CatalogError::new)?;

        rows.into_iter().map(FuelStation::try_from).collect()
    }

    async fn average_price(&self) -> Result<Option<Decimal>, CatalogError> {
        // One row back; the sum stays in Decimal rather than SQLite REAL
        let (count, prices): (i64, Option<String>) =
            sqlx::query_as("SELECT COUNT(*), group_concat(retail_price, ',') FROM fuel_stations")
                .fetch_one(&self.pool)
                .await
                .map_err(CatalogError::new)?;

        let Some(prices) = prices.filter(|_| count > 0) else {
            return Ok(None);
        };

        let mut total = Decimal::ZERO;
        for price in prices.split(',') {
            total += parse_price(price)?;
        }
        Ok(Some(total / Decimal::from(count)))
    }
}

fn parse_price(raw: &str) -> Result<Decimal, CatalogError> {
    Decimal::from_str(raw.trim())
        .map_err(|err| CatalogError::new(format!("invalid stored price '{}': {}", raw, err)))
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct StationRow {
    id: i64,
    truckstop_name: String,
    address: String,
    city: String,
    state: String,
    retail_price: String,
    latitude: f64,
    longitude: f64,
}

impl TryFrom<StationRow> for FuelStation {
    type Error = CatalogError;

    fn try_from(row: StationRow) -> Result<Self, CatalogError> {
        let price = parse_price(&row.retail_price)?;
        let location = Coordinate::new(row.latitude, row.longitude).map_err(|err| {
            CatalogError::new(format!("station {} has invalid coordinates: {}", row.id, err))
        })?;

        Ok(FuelStation {
            id: row.id,
            name: row.truckstop_name,
            address: row.address,
            city: row.city,
            state: row.state,
            price,
            location,
        })
    }
}

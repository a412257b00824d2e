//! Persistence layer for the fuel server.
//!
//! SQLite-backed station catalog queried by bounding box and price.

pub mod db;
pub mod stations;

pub use db::{init_database, Database};
pub use stations::{count_stations, insert_station, NewStation, SqliteCatalog};

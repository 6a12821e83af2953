//! Domain models and Postgres access layer for travel itineraries.
//!
//! The schema lives in `migrations/` and is embedded as [`MIGRATOR`].

pub mod auth;
pub mod database;
pub mod errors;
pub mod models;

pub use database::Database;
pub use errors::TripsError;

/// Embedded schema migrations for the users, places, trips and segments tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

//! Shared helpers for database-backed tests.
//!
//! Every test gets its own Postgres schema with migrations applied, so tests
//! can run in parallel against one development database.

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::env;
use uuid::Uuid;

pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    /// Drops the per-test schema and closes both pools.
    pub async fn cleanup(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.admin)
            .await;
        self.admin.close().await;
    }
}

/// Get an isolated, migrated database, skipping tests if DATABASE_URL is not set.
pub async fn get_test_db() -> Option<TestDb> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let admin = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    let schema = format!("trips_test_{}", Uuid::new_v4().simple());
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");

    let options: PgConnectOptions = database_url
        .parse::<PgConnectOptions>()
        .expect("Invalid DATABASE_URL")
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .expect("Failed to connect with test schema");

    trips::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(TestDb {
        pool,
        admin,
        schema,
    })
}

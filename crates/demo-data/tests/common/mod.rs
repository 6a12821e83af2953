//! Shared helpers for database-backed tests.
//!
//! Each test seeds into its own migrated Postgres schema, because the seeder
//! asserts on database-wide totals.

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::env;
use uuid::Uuid;

pub struct TestDb {
    admin: PgPool,
    options: PgConnectOptions,
    schema: String,
}

impl TestDb {
    /// Opens a fresh pool scoped to this test's schema.
    pub async fn new_pool(&self) -> PgPool {
        PgPoolOptions::new()
            .max_connections(2)
            .connect_with(self.options.clone())
            .await
            .expect("Failed to connect with test schema")
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}.{table}", self.schema))
            .fetch_one(&self.admin)
            .await
            .expect("Failed to count rows")
    }

    /// Drops the per-test schema.
    pub async fn cleanup(self) {
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

    let schema = format!("demo_test_{}", Uuid::new_v4().simple());
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");

    let options = database_url
        .parse::<PgConnectOptions>()
        .expect("Invalid DATABASE_URL")
        .options([("search_path", schema.as_str())]);

    let test_db = TestDb {
        admin,
        options,
        schema,
    };

    let pool = test_db.new_pool().await;
    trips::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool.close().await;

    Some(test_db)
}

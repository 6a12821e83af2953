//! Database connectivity smoke test.
//!
//! Failures are logged and reported as [`CheckOutcome::Failed`], never
//! propagated, and the pool is closed on every path.

use sqlx::PgPool;
use tracing::{error, info};
use trips::models::User;
use trips::{Database, TripsError};

#[derive(Debug)]
pub enum CheckOutcome {
    Connected { users: Vec<User> },
    Failed { reason: String },
}

impl CheckOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, CheckOutcome::Connected { .. })
    }
}

/// Pings the database and fetches every user.
pub async fn check_connection(db: &Database) -> Result<Vec<User>, TripsError> {
    db.ping().await?;
    info!("Database connected");

    db.list_users().await
}

/// Runs [`check_connection`] and closes `pool` regardless of the result.
pub async fn run_check(pool: PgPool) -> CheckOutcome {
    let db = Database::new(pool);

    let outcome = match check_connection(&db).await {
        Ok(users) => {
            info!("Found {} users", users.len());
            CheckOutcome::Connected { users }
        }
        Err(e) => {
            error!("Connection failed: {e}");
            CheckOutcome::Failed {
                reason: e.to_string(),
            }
        }
    };

    db.close().await;
    outcome
}

/// Renders users as pretty JSON. Password hashes are never included.
pub fn render_users(users: &[User]) -> String {
    serde_json::to_string_pretty(users).unwrap_or_else(|e| format!("<unprintable users: {e}>"))
}

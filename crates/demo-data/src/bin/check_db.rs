//! Database connectivity check: connects, lists users, disconnects.
//!
//! Run with:
//! ```
//! cargo run -p demo-data --bin check-db
//! ```
//!
//! Always exits successfully; failures are logged.

use demo_data::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = match SeedConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Connection failed: {e}");
            return Ok(());
        }
    };
    tracing::info!("Connecting to database at {}", config.redacted_url());

    let pool = match config
        .pool_options()
        .max_connections(1)
        .connect_lazy(&config.database_url)
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Connection failed: {e}");
            return Ok(());
        }
    };

    if let CheckOutcome::Connected { users } = run_check(pool).await {
        println!("Users: {}", render_users(&users));
    }

    Ok(())
}

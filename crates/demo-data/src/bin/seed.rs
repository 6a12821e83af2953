//! Seeds the demo user, places and trips, then prints a summary.
//!
//! Run with:
//! ```
//! cargo run -p demo-data --bin seed
//! ```
//!
//! Fails with a non-zero exit status if anything goes wrong, including a
//! re-run against an already seeded database.

use demo_data::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = SeedConfig::from_env()?;
    tracing::info!("Connecting to database at {}", config.redacted_url());

    let pool = config
        .pool_options()
        .connect(&config.database_url)
        .await
        .inspect_err(|e| tracing::error!("Seeding failed: could not connect: {e}"))?;

    let summary = run_seed(pool, &config, &demo_dataset()).await?;

    println!("\n{summary}");
    println!("\nSeeding complete!\n");

    Ok(())
}

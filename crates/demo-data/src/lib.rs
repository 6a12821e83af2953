//! Demo data for the trips database.
//!
//! This crate seeds a fresh database with one user, five cities and two
//! trips, and provides a connectivity check that lists the stored users.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use demo_data::prelude::*;
//!
//! let config = SeedConfig::from_env()?;
//! let pool = config.pool_options().connect(&config.database_url).await?;
//! let summary = run_seed(pool, &config, &demo_dataset()).await?;
//! println!("{summary}");
//! ```

pub mod check;
pub mod config;
pub mod db;
pub mod fixtures;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber, filtered by `RUST_LOG` and defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::check::{CheckOutcome, check_connection, render_users, run_check};
    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, SeedSummary, Seeder, run_seed};
    pub use crate::fixtures::{DemoDataset, PlaceKey, ScheduleWarning, demo_dataset};
    pub use crate::init_logging;
}

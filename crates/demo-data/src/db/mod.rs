//! Database integration for seeding demo data.
//!
//! The [`Seeder`] writes the demo dataset through the `trips` access layer;
//! [`run_seed`] wraps it with guaranteed pool shutdown.

mod seeder;

pub use seeder::{SeedError, SeedSummary, Seeder, run_seed};

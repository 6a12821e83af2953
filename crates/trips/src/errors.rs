use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripsError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Unique constraint violated: {constraint}")]
    Conflict { constraint: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Not found")]
    NotFound,
}

impl TripsError {
    /// Returns true if this error came from a unique constraint, such as a
    /// duplicate email or share token.
    pub fn is_conflict(&self) -> bool {
        matches!(self, TripsError::Conflict { .. })
    }
}

impl From<sqlx::Error> for TripsError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return TripsError::Conflict {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        TripsError::Database(err)
    }
}

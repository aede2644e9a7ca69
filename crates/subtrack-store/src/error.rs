//! Error types for subtrack storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database connection or query failed.
    #[error("database error: {0}")]
    Database(String),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type.
        entity: &'static str,
        /// Requested identifier.
        id: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(err.to_string())
    }
}

impl StoreError {
    /// Not-found error for a subscription id.
    #[must_use]
    pub fn subscription_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "subscription",
            id: id.to_string(),
        }
    }
}

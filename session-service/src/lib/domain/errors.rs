use thiserror::Error;

/// Failure reported by a persistence adapter.
///
/// Lookups signal absence with `Ok(None)`; `NotFound` is only returned by writes that
/// target a single existing row (e.g. revoking a refresh token).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => match other.as_database_error() {
                Some(db_err) if db_err.is_unique_violation() => StoreError::Conflict(
                    db_err.constraint().unwrap_or("unknown").to_string(),
                ),
                _ => StoreError::Database(other.to_string()),
            },
        }
    }
}

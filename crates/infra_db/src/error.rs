//! Database error types

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in the database
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The guarded settlement insert found the balance insufficient
    #[error("settlement of {requested} exceeds outstanding balance of {available}")]
    BalanceExceeded {
        requested: Decimal,
        available: Decimal,
    },

    /// Foreign key constraint violation
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Pool exhaustion - no available connections
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Migration error
    #[error("migration failed: {0}")]
    MigrationFailed(String),
}

impl DatabaseError {
    /// Creates a not-found error for an entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{entity} with id '{id}' not found"))
    }

    /// Maps a SQLx error to the closest variant
    ///
    /// Classification follows the PostgreSQL error codes:
    /// 23503 (foreign key) and 23514 (check constraint) get their own
    /// variants; everything else is a query failure.
    pub fn classify(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23503") => DatabaseError::ForeignKeyViolation(db_err.message().to_string()),
                Some("23514") => DatabaseError::ConstraintViolation(db_err.message().to_string()),
                _ => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }

    /// Checks whether this error indicates a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = DatabaseError::not_found("Agent", "AGT-123");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Agent"));
        assert!(error.to_string().contains("AGT-123"));
    }

    #[test]
    fn test_classify_row_not_found() {
        let error = DatabaseError::classify(sqlx::Error::RowNotFound);
        assert!(error.is_not_found());
    }
}

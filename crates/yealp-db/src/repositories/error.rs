//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use yealp_core::error::DomainError;

/// Errors meaning the database could not be reached at all
fn is_connection_error(e: &SqlxError) -> bool {
    matches!(
        e,
        SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::WorkerCrashed
    )
}

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    if is_connection_error(&e) {
        DomainError::DatabaseUnavailable(e.to_string())
    } else {
        DomainError::DatabaseError(e.to_string())
    }
}

pub fn is_unique_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if is_unique_violation(&e) {
        return on_unique();
    }
    map_db_error(e)
}

/// Check for a foreign key violation (the referenced row is missing)
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
    {
        return on_missing();
    }
    map_db_error(e)
}

/// Map a violated CHECK constraint, falling back to the foreign key mapping
pub fn map_edge_violation<C, F>(e: SqlxError, on_check: C, on_missing: F) -> DomainError
where
    C: FnOnce() -> DomainError,
    F: FnOnce() -> DomainError,
{
    if e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_check_violation())
    {
        return on_check();
    }
    map_foreign_key_violation(e, on_missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(map_db_error(SqlxError::PoolTimedOut).is_unavailable());
        assert!(map_db_error(SqlxError::PoolClosed).is_unavailable());
    }

    #[test]
    fn test_other_errors_are_database_errors() {
        let err = map_db_error(SqlxError::RowNotFound);
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert!(!is_unique_violation(&SqlxError::RowNotFound));
    }

    #[test]
    fn test_fallbacks_preserve_unavailability() {
        let err = map_unique_violation(SqlxError::PoolTimedOut, || {
            DomainError::EmailAlreadyExists
        });
        assert!(err.is_unavailable());
    }
}

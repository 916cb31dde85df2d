//! Mapping from database errors to domain store errors.

use domain::stores::StoreError;

/// Postgres SQLSTATE for a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for a foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Returns the SQLSTATE code of a database error, if any.
pub fn sql_state(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

fn constraint_name(err: &sqlx::Error, fallback: &str) -> String {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().unwrap_or(fallback).to_string(),
        _ => fallback.to_string(),
    }
}

/// Converts a sqlx error into a [`StoreError`].
pub fn store_error(err: sqlx::Error) -> StoreError {
    match sql_state(&err).as_deref() {
        Some(UNIQUE_VIOLATION) => StoreError::Duplicate(constraint_name(&err, "unique")),
        Some(FOREIGN_KEY_VIOLATION) => {
            StoreError::MissingReference(constraint_name(&err, "foreign_key"))
        }
        _ => {
            tracing::error!(error = %err, "Store query failed");
            StoreError::Backend(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_backend() {
        let err = store_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(sql_state(&sqlx::Error::PoolTimedOut), None);
    }
}

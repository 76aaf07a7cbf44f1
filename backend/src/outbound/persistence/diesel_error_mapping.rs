//! Shared Diesel error mapping for the persistence adapters.
//!
//! Both adapters expose port errors with `Connection` and `Query` variants;
//! these helpers take the port's constructors so the classification lives in
//! one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool error into a port's connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(error = %error, "connection checkout failed");
    connection(error.into_message())
}

/// Map a Diesel error raised by `operation` into a port error.
///
/// Closed connections become connection errors; everything else is a query
/// error carrying a short classification and the operation name.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    operation: &str,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        other => debug!(error = %other, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection(format!("{operation}: database connection closed"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            query(format!(
                "{operation}: foreign key violation ({})",
                info.constraint_name().unwrap_or("unnamed constraint")
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query(format!("{operation}: duplicate key"))
        }
        DieselError::DatabaseError(_, info) => {
            query(format!("{operation}: database error: {}", info.message()))
        }
        DieselError::NotFound => query(format!("{operation}: record not found")),
        DieselError::QueryBuilderError(_) => query(format!("{operation}: query builder error")),
        DieselError::DeserializationError(err) => {
            query(format!("{operation}: failed to decode row: {err}"))
        }
        other => query(format!("{operation}: {other}")),
    }
}

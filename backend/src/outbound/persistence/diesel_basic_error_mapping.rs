//! Diesel and pool error mapping shared by the PostgreSQL adapters.
//!
//! Every port error generated by `define_port_error!` has `connection` and
//! `query` constructors; adapters pass those in so one mapping serves all.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::models::InvalidRow;
use super::pool::PoolError;

/// Pool failures always mean the database is unreachable.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.message().to_owned())
}

/// Closed connections are connection failures; everything else is a query
/// failure. Driver detail is logged at debug level and kept out of the error.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection closed".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("duplicate record".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record missing".to_owned())
        }
        DieselError::NotFound => query("record not found".to_owned()),
        _ => query("database error".to_owned()),
    }
}

/// Rows the domain rejects surface as query failures.
pub(crate) fn map_invalid_row<E>(error: InvalidRow, query: impl FnOnce(String) -> E) -> E {
    debug!(%error, "stored row failed validation");
    query(error.to_string())
}

//! Shared Diesel and pool error mapping for the record stores.

use tracing::debug;

use crate::domain::ports::RecordStoreError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> RecordStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordStoreError::connection(message)
        }
    }
}

/// Collapse Diesel failures into connection or query errors.
///
/// Database messages are logged at debug and never forwarded, so SQL
/// details stay out of client-visible errors.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> RecordStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RecordStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => RecordStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecordStoreError::connection("database connection error")
        }
        _ => RecordStoreError::query("database error"),
    }
}

//! Translation of pool and Diesel failures into repository port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{HouseholdRepositoryError, UserPersistenceError};

use super::models::InvalidRow;
use super::pool::PoolError;

/// Port errors that distinguish an unreachable database from a failed query.
pub(super) trait StorageFailure: Sized {
    fn unavailable(message: String) -> Self;
    fn failed(message: &'static str) -> Self;
}

impl StorageFailure for HouseholdRepositoryError {
    fn unavailable(message: String) -> Self {
        Self::connection(message)
    }

    fn failed(message: &'static str) -> Self {
        Self::query(message)
    }
}

impl StorageFailure for UserPersistenceError {
    fn unavailable(message: String) -> Self {
        Self::connection(message)
    }

    fn failed(message: &'static str) -> Self {
        Self::query(message)
    }
}

fn pool_failure<E: StorageFailure>(error: PoolError) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => E::unavailable(message),
    }
}

/// Log the driver detail at debug level and return a redacted port error.
fn diesel_failure<E: StorageFailure>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => E::failed("record not found"),
        DieselError::QueryBuilderError(_) => E::failed("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::unavailable("database connection error".to_owned())
        }
        _ => E::failed("database error"),
    }
}

pub(super) fn map_pool_error(error: PoolError) -> HouseholdRepositoryError {
    pool_failure(error)
}

pub(super) fn map_diesel_error(error: DieselError) -> HouseholdRepositoryError {
    diesel_failure(error)
}

pub(super) fn map_user_pool_error(error: PoolError) -> UserPersistenceError {
    pool_failure(error)
}

pub(super) fn map_user_diesel_error(error: DieselError) -> UserPersistenceError {
    diesel_failure(error)
}

/// Whether `error` is a unique-constraint violation.
pub(super) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

pub(super) fn map_invalid_row(error: InvalidRow) -> HouseholdRepositoryError {
    debug!(table = error.table, id = %error.id, reason = %error.reason, "stored row rejected");
    HouseholdRepositoryError::serialization(error.to_string())
}

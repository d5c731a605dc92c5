//! Error handling utilities for repositories

use duck_core::error::DomainError;
use duck_core::value_objects::{DuckId, UserId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a foreign key violation on `owner_id`/`user_id` to a missing user
pub fn map_missing_user(e: SqlxError, user_id: UserId) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::UserNotFound(user_id);
        }
    }
    map_db_error(e)
}

/// Create a "duck not found" error
pub fn duck_not_found(id: DuckId) -> DomainError {
    DomainError::DuckNotFound(id)
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}

use sea_orm::error::DbErr;
use std::fmt::Display;

/// Errors surfaced by entity accessors and repositories.
///
/// Storage failures are passed through untouched inside `DatabaseError`; a
/// lookup that finds no row becomes `NotFound`. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn db_error(error: DbErr) -> Self {
        ServiceError::DatabaseError(error)
    }

    /// Not-found error for a row of `entity` identified by `id`.
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        ServiceError::NotFound(format!("{} with ID {} not found", entity, id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

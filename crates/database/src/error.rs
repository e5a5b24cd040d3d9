use models::{access::AccessDenied, registration::CapExceeded};
use sea_orm::{DbErr, SqlErr};

/// Errors returned by the services. Everything except `Database` and
/// `Internal` is the caller's fault and safe to show them.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl From<CapExceeded> for ServiceError {
    fn from(err: CapExceeded) -> Self {
        Self::Validation(err.to_string())
    }
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Turns a unique constraint violation into a conflict carrying `message`,
    /// passing every other database error through unchanged
    pub fn on_unique_violation(err: DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::conflict(message),
            _ => Self::Database(err),
        }
    }

    /// Like [`Self::on_unique_violation`], but picks the message paired with
    /// the first column the violated constraint names, else `fallback`
    pub fn on_unique_violation_of(err: DbErr, columns: &[(&str, &str)], fallback: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                let message = columns
                    .iter()
                    .find(|(column, _)| detail.contains(*column))
                    .map_or(fallback, |(_, message)| *message);
                Self::conflict(message)
            }
            _ => Self::Database(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

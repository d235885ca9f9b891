use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure taxonomy shared by every core operation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("fatal database error")]
    Database(#[source] DbErr),

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A stored invariant was found broken. Points at data corruption rather
    /// than a caller mistake.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str) -> Self {
        CoreError::NotFound { entity }
    }

    /// System faults, as opposed to errors caused by the request itself.
    pub fn is_fault(&self) -> bool {
        matches!(self, CoreError::Database(_) | CoreError::InvalidState(_))
    }
}

impl From<DbErr> for CoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => CoreError::Conflict(message),
            _ => CoreError::Database(err),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Rejects blank required text input.
pub(crate) fn require_text(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no data directory on this platform")]
    NoDataDir,

    #[error("config file unreadable")]
    ConfigIo(#[from] std::io::Error),

    #[error("config file is not valid json")]
    ConfigJson(#[from] serde_json::Error),

    #[error("data store unavailable")]
    Database(#[from] DbErr),
}

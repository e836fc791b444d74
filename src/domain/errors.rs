//! Domain error types
//!
//! These errors are framework-agnostic and represent catalog-level failures.
//! Storage errors are classified on the way in so that constraint violations
//! reach callers as rejected writes rather than opaque database faults.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No row matches the requested identity
    NotFound,
    /// Input rejected before reaching storage (length, blank field)
    Validation(String),
    /// A unique constraint rejected the write
    UniquenessViolation(String),
    /// A delete was refused because other rows still reference the target
    ReferentialRestriction(String),
    /// Connectivity or any other storage fault
    StorageUnavailable(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::UniquenessViolation(msg) => write!(f, "{}", msg),
            DomainError::ReferentialRestriction(msg) => write!(f, "{}", msg),
            DomainError::StorageUnavailable(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match constraint_kind(&e) {
            Some(ConstraintKind::Unique) => DomainError::UniquenessViolation(e.to_string()),
            Some(ConstraintKind::ForeignKey) => DomainError::ReferentialRestriction(e.to_string()),
            Some(ConstraintKind::Check) => DomainError::Validation(e.to_string()),
            None => DomainError::StorageUnavailable(e.to_string()),
        }
    }
}

/// Storage constraint families the catalog cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
}

/// SQLite reports `ON DELETE RESTRICT` refusals as a trigger constraint
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Classify a SeaORM error by the constraint that raised it, if any.
pub fn constraint_kind(e: &sea_orm::DbErr) -> Option<ConstraintKind> {
    use sea_orm::{DbErr, RuntimeErr, SqlErr};
    use sqlx::error::ErrorKind;

    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return Some(ConstraintKind::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            return Some(ConstraintKind::ForeignKey);
        }
        _ => {}
    }

    // sql_err() does not report CHECK failures, ask the driver directly
    let runtime = match e {
        DbErr::Exec(err) | DbErr::Query(err) | DbErr::Conn(err) => err,
        _ => return None,
    };
    let RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) = runtime else {
        return None;
    };

    match db_err.kind() {
        ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
        ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
        ErrorKind::CheckViolation | ErrorKind::NotNullViolation => Some(ConstraintKind::Check),
        _ if db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER)
            && db_err.message().contains("FOREIGN KEY") =>
        {
            Some(ConstraintKind::ForeignKey)
        }
        _ => None,
    }
}

/// Registration failure taxonomy
///
/// Every way a registration can fail collapses into one of these variants.
/// The HTTP layer logs the variant's [`RegistrationError::code`] and sends the
/// browser to the generic error page; no detail reaches the client.

use crate::auth::password::PasswordError;
use serde::Serialize;
use std::fmt;

/// A rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name as submitted
    pub field: String,

    /// What was wrong with it
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Which database constraint rejected the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Violation::Unique => "unique",
            Violation::ForeignKey => "foreign key",
            Violation::NotNull => "not null",
            Violation::Check => "check",
        };
        f.write_str(s)
    }
}

/// Error type for the registration workflow
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// Form was malformed, incomplete, or a value is wider than its column
    #[error("Validation failed: {} field(s) rejected", .0.len())]
    Validation(Vec<FieldError>),

    /// The database refused the row because of a constraint
    #[error("Integrity violation ({violation}) on constraint {constraint}")]
    Integrity {
        violation: Violation,
        constraint: String,
    },

    /// The database could not be reached or the connection broke
    #[error("Database unreachable: {0}")]
    Connectivity(String),

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(String),
}

impl RegistrationError {
    /// Stable, log-friendly identifier of the failure class
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::Validation(_) => "validation",
            RegistrationError::Integrity { .. } => "integrity",
            RegistrationError::Connectivity(_) => "connectivity",
            RegistrationError::Hashing(_) => "hashing",
            RegistrationError::Database(_) => "database",
        }
    }

    /// Whether the same submission could succeed later without changes
    pub fn is_transient(&self) -> bool {
        matches!(self, RegistrationError::Connectivity(_))
    }
}

impl From<sqlx::Error> for RegistrationError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match err {
            sqlx::Error::Database(db_err) => {
                let violation = match db_err.kind() {
                    ErrorKind::UniqueViolation => Some(Violation::Unique),
                    ErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey),
                    ErrorKind::NotNullViolation => Some(Violation::NotNull),
                    ErrorKind::CheckViolation => Some(Violation::Check),
                    _ => None,
                };

                match violation {
                    Some(violation) => RegistrationError::Integrity {
                        violation,
                        constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                    },
                    None => RegistrationError::Database(db_err.to_string()),
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_) => RegistrationError::Connectivity(err.to_string()),
            other => RegistrationError::Database(other.to_string()),
        }
    }
}

impl From<PasswordError> for RegistrationError {
    fn from(err: PasswordError) -> Self {
        RegistrationError::Hashing(err.to_string())
    }
}

impl From<validator::ValidationErrors> for RegistrationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    FieldError::new(
                        field.to_string(),
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Validation failed".to_string()),
                    )
                })
            })
            .collect();

        details.sort_by(|a, b| a.field.cmp(&b.field));
        RegistrationError::Validation(details)
    }
}

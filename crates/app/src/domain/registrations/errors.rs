//! Registrations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::registrations::status::RegistrationStatus;

#[derive(Debug, Error)]
pub enum RegistrationsServiceError {
    #[error("registration not found")]
    NotFound,

    #[error("cannot move registration from {from} to {to}")]
    InvalidTransition {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RegistrationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

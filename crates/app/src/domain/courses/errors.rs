//! Courses service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::courses::data::CourseDraftError;

#[derive(Debug, Error)]
pub enum CoursesServiceError {
    #[error("course code already exists")]
    AlreadyExists,

    #[error("course not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    InvalidDraft(#[from] CourseDraftError),

    #[error("invalid credits value")]
    InvalidCredits(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CoursesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

//! Analytics service errors.

use thiserror::Error;

use crate::domain::{
    analytics::window::WindowError, courses::CoursesServiceError,
    registrations::RegistrationsServiceError,
};

#[derive(Debug, Error)]
pub enum AnalyticsServiceError {
    #[error(transparent)]
    InvalidWindow(#[from] WindowError),

    #[error("failed to load registrations")]
    Registrations(#[source] RegistrationsServiceError),

    #[error("failed to load courses")]
    Courses(#[source] CoursesServiceError),
}

impl From<RegistrationsServiceError> for AnalyticsServiceError {
    fn from(error: RegistrationsServiceError) -> Self {
        Self::Registrations(error)
    }
}

impl From<CoursesServiceError> for AnalyticsServiceError {
    fn from(error: CoursesServiceError) -> Self {
        Self::Courses(error)
    }
}

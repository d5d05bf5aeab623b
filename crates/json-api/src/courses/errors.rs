//! Course Errors

use salvo::http::StatusError;
use tracing::error;

use academy_app::domain::courses::CoursesServiceError;

pub(crate) fn into_status_error(error: CoursesServiceError) -> StatusError {
    match error {
        CoursesServiceError::AlreadyExists => {
            StatusError::conflict().brief("A course with this code already exists")
        }
        CoursesServiceError::InvalidDraft(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CoursesServiceError::MissingRequiredData
        | CoursesServiceError::InvalidData
        | CoursesServiceError::InvalidCredits(_) => {
            StatusError::bad_request().brief("Invalid course payload")
        }
        CoursesServiceError::NotFound => StatusError::not_found().brief("Course not found"),
        CoursesServiceError::Sql(source) => {
            error!("failed to store course: {source}");

            StatusError::internal_server_error()
        }
    }
}

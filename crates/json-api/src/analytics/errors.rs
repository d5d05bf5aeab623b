//! Analytics Errors

use salvo::http::StatusError;
use tracing::error;

use academy_app::domain::analytics::AnalyticsServiceError;

pub(crate) fn into_status_error(error: AnalyticsServiceError) -> StatusError {
    match error {
        AnalyticsServiceError::InvalidWindow(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        AnalyticsServiceError::Registrations(source) => {
            error!("failed to read registrations for analytics: {source}");

            StatusError::internal_server_error()
        }
        AnalyticsServiceError::Courses(source) => {
            error!("failed to read courses for analytics: {source}");

            StatusError::internal_server_error()
        }
    }
}

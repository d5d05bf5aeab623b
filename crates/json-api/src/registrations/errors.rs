//! Registration Errors

use salvo::http::StatusError;
use tracing::error;

use academy_app::domain::registrations::RegistrationsServiceError;

pub(crate) fn into_status_error(error: RegistrationsServiceError) -> StatusError {
    match error {
        RegistrationsServiceError::NotFound => {
            StatusError::not_found().brief("Registration not found")
        }
        RegistrationsServiceError::InvalidTransition { from, to } => {
            StatusError::conflict().brief(format!("Cannot move registration from {from} to {to}"))
        }
        RegistrationsServiceError::MissingRequiredData
        | RegistrationsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid registration payload")
        }
        RegistrationsServiceError::Sql(source) => {
            error!("failed to store registration: {source}");

            StatusError::internal_server_error()
        }
    }
}

//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use academy_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::Unauthorized | AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid or expired access token")
        }
        AuthServiceError::NotAdmin => {
            StatusError::unauthorized().brief("Access denied. Admin privileges required.")
        }
        AuthServiceError::HostedAuth(source) => {
            error!("hosted auth request failed: {source}");

            StatusError::bad_gateway()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to read admin users: {source}");

            StatusError::internal_server_error()
        }
    }
}

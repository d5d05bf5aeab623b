//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::HostedAuthError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("missing or expired access token")]
    Unauthorized,

    #[error("user is not an admin")]
    NotAdmin,

    #[error("admin user not found")]
    NotFound,

    #[error("hosted auth error")]
    HostedAuth(#[source] HostedAuthError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            other => Self::Sql(other),
        }
    }
}

impl From<HostedAuthError> for AuthServiceError {
    fn from(error: HostedAuthError) -> Self {
        match error {
            HostedAuthError::InvalidCredentials => Self::InvalidCredentials,
            HostedAuthError::Unauthorized => Self::Unauthorized,
            other @ (HostedAuthError::Http(_) | HostedAuthError::UnexpectedResponse(_)) => {
                Self::HostedAuth(other)
            }
        }
    }
}

//! Result helpers for handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Collapse an unexpected failure into a logged 500.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &'static str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &'static str) -> Result<T, StatusError> {
        self.map_err(|source| {
            error!(context, error = %source, "unexpected handler failure");

            StatusError::internal_server_error().brief("Internal server error")
        })
    }
}

//! Relay errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay is not configured")]
    NotConfigured,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("downstream returned {status}: {body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    #[error("payload cannot be form encoded: {0}")]
    InvalidPayload(String),
}

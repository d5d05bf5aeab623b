//! Relay functions called by the browser and automation tools.
//!
//! Every response is a JSON object with a `success` flag; failures carry an
//! `error` and sometimes `details`.

use salvo::{
    cors::{AllowOrigin, Cors, CorsHandler},
    http::{
        HeaderName, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub(crate) mod email;
pub(crate) mod forward;
pub(crate) mod record;

/// Any origin may call the relays.
pub(crate) fn cors() -> CorsHandler {
    Cors::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
        .into_handler()
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct RelayResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_status: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_response: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

impl RelayResponse {
    pub(crate) fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub(crate) fn with_details(mut self, details: impl ToString) -> Self {
        self.details = Some(details.to_string());
        self
    }

    pub(crate) fn render(self, status: StatusCode, res: &mut Response) {
        res.status_code(status).render(Json(self));
    }
}

//! Raw webhook relay.

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::Value;
use tracing::{error, info};

use academy_app::relay::RelayError;

use crate::{extensions::*, functions::RelayResponse, state::State};

/// Forward any JSON object to the automation webhook unchanged.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let body = match req.parse_json::<Value>().await {
        Ok(body @ Value::Object(_)) => body,
        Ok(_) | Err(_) => {
            RelayResponse::failure("Request body must be a JSON object")
                .render(StatusCode::BAD_REQUEST, res);

            return;
        }
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);

            return;
        }
    };

    match state.app.webhook.forward_raw(body).await {
        Ok(response) if response.is_success() => {
            info!(status = response.status.as_u16(), "payload forwarded to webhook");

            RelayResponse {
                success: true,
                message: Some("Registration forwarded to webhook successfully".to_string()),
                webhook_status: Some(response.status.as_u16()),
                webhook_response: Some(response.body),
                ..RelayResponse::default()
            }
            .render(StatusCode::OK, res);
        }
        Ok(response) => {
            error!(status = response.status.as_u16(), body = %response.body, "webhook rejected payload");

            RelayResponse {
                webhook_status: Some(response.status.as_u16()),
                webhook_response: Some(response.body),
                ..RelayResponse::failure("Failed to forward to webhook")
            }
            .render(StatusCode::INTERNAL_SERVER_ERROR, res);
        }
        Err(RelayError::NotConfigured) => {
            RelayResponse::failure("Webhook is not configured")
                .render(StatusCode::SERVICE_UNAVAILABLE, res);
        }
        Err(RelayError::InvalidPayload(reason)) => {
            RelayResponse::failure("Payload cannot be forwarded")
                .with_details(reason)
                .render(StatusCode::BAD_REQUEST, res);
        }
        Err(relay_error) => {
            error!("failed to reach webhook: {relay_error}");

            RelayResponse::failure("Internal server error")
                .with_details(relay_error)
                .render(StatusCode::INTERNAL_SERVER_ERROR, res);
        }
    }
}

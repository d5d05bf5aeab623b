//! Admin email relay.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use academy_app::relay::{
    RelayError,
    email::{AdminEmailKind, EmailRegistration},
};

use crate::{extensions::*, functions::RelayResponse, state::State};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RegistrationDetails {
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub course_selection: String,
    pub number_of_seats: Option<u8>,
    pub submission_date: Option<String>,
}

impl From<RegistrationDetails> for EmailRegistration {
    fn from(details: RegistrationDetails) -> Self {
        EmailRegistration {
            id: details.id.map(Into::into),
            name: details.name,
            email: details.email,
            phone: details.phone,
            company_name: details.company_name,
            course_selection: details.course_selection,
            number_of_seats: details.number_of_seats,
            submission_date: details
                .submission_date
                .and_then(|date| date.parse::<Timestamp>().ok()),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct EmailData {
    #[serde(default)]
    pub registration: RegistrationDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AdminEmailRequest {
    /// `quote_request` or `invoice_request`
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub data: EmailData,
}

/// Email the admin team about a quote or invoice request.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let request = match req.parse_json::<AdminEmailRequest>().await {
        Ok(request) => request,
        Err(parse_error) => {
            RelayResponse::failure("Request body must be a JSON object with a type")
                .with_details(parse_error)
                .render(StatusCode::BAD_REQUEST, res);

            return;
        }
    };

    let kind = match request.kind.parse::<AdminEmailKind>() {
        Ok(kind) => kind,
        Err(unknown) => {
            RelayResponse::failure(unknown.to_string()).render(StatusCode::BAD_REQUEST, res);

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

    match state
        .app
        .admin_notifier
        .notify(kind, request.data.registration.into())
        .await
    {
        Ok(email_id) => RelayResponse {
            success: true,
            email_id: Some(email_id),
            ..RelayResponse::default()
        }
        .render(StatusCode::OK, res),
        Err(RelayError::NotConfigured) => {
            RelayResponse::failure("Email relay is not configured")
                .render(StatusCode::SERVICE_UNAVAILABLE, res);
        }
        Err(relay_error) => {
            error!("failed to send admin email: {relay_error}");

            RelayResponse::failure(relay_error.to_string())
                .render(StatusCode::INTERNAL_SERVER_ERROR, res);
        }
    }
}

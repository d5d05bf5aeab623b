//! Record-registration relay.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::error;

use academy_app::domain::registrations::{data::Submission, status::ActionType};

use crate::{extensions::*, functions::RelayResponse, state::State};

/// A lead in the webhook's field layout. Every field is optional on the wire.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RecordRegistrationRequest {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub vat_number: Option<String>,
    pub course_selection: String,
    pub number_of_seats: Option<u8>,
    pub action_type: Option<String>,
    pub submission_date: Option<String>,
}

impl From<RecordRegistrationRequest> for Submission {
    fn from(request: RecordRegistrationRequest) -> Self {
        Submission {
            first_name: request.first_name,
            surname: request.surname,
            full_name: request.full_name,
            name: request.name,
            email: request.email,
            phone: request.phone,
            company_name: request.company_name,
            vat_number: request.vat_number,
            course_selection: request.course_selection,
            number_of_seats: request.number_of_seats.filter(|seats| *seats > 0),
            action_type: request
                .action_type
                .and_then(|action| action.parse::<ActionType>().ok())
                .unwrap_or_default(),
            submission_date: request
                .submission_date
                .and_then(|date| date.parse::<Timestamp>().ok()),
        }
    }
}

/// Store a lead sent in webhook format, then forward it on.
#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let request = match req.parse_json::<RecordRegistrationRequest>().await {
        Ok(request) => request,
        Err(parse_error) => {
            RelayResponse::failure("Request body must be a JSON object")
                .with_details(parse_error)
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

    match state.app.submissions.record_submission(request.into()).await {
        Ok(receipt) => RelayResponse {
            success: true,
            message: Some("Registration recorded successfully and forwarded to webhook".to_string()),
            registration_id: Some(receipt.registration.into()),
            timestamp: Some(receipt.submitted_at.to_string()),
            ..RelayResponse::default()
        }
        .render(StatusCode::OK, res),
        Err(record_error) => {
            error!("failed to record registration: {record_error}");

            RelayResponse::failure("Internal server error")
                .with_details(record_error)
                .render(StatusCode::INTERNAL_SERVER_ERROR, res);
        }
    }
}

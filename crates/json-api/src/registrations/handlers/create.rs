//! Submit Registration Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use academy_app::domain::registrations::{
    status::ActionType,
    validation::{RegistrationForm, ValidationErrors},
};

use crate::{
    extensions::*,
    observability::{SubmissionOutcome, record_registration_submission},
    registrations::errors::into_status_error,
    state::State,
};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ActionTypeRequest {
    #[default]
    Register,
    Quote,
}

impl From<ActionTypeRequest> for ActionType {
    fn from(action: ActionTypeRequest) -> Self {
        match action {
            ActionTypeRequest::Register => ActionType::Register,
            ActionTypeRequest::Quote => ActionType::Quote,
        }
    }
}

/// Registration form as submitted by the browser.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct RegistrationRequest {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub vat_number: Option<String>,
    pub course_selection: String,
    pub number_of_seats: u32,
    pub action_type: ActionTypeRequest,
}

impl Default for RegistrationRequest {
    /// The form starts at one seat.
    fn default() -> Self {
        Self {
            first_name: String::new(),
            surname: String::new(),
            email: String::new(),
            phone: String::new(),
            company_name: None,
            vat_number: None,
            course_selection: String::new(),
            number_of_seats: 1,
            action_type: ActionTypeRequest::default(),
        }
    }
}

impl From<RegistrationRequest> for RegistrationForm {
    fn from(request: RegistrationRequest) -> Self {
        RegistrationForm {
            first_name: request.first_name,
            surname: request.surname,
            email: request.email,
            phone: request.phone,
            company_name: request.company_name,
            vat_number: request.vat_number,
            course_selection: request.course_selection,
            number_of_seats: request.number_of_seats,
            action_type: request.action_type.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegistrationCreatedResponse {
    pub registration_id: Uuid,

    /// When the registration was stored
    pub timestamp: String,
}

/// Field-keyed validation messages.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidationErrorResponse {
    pub errors: BTreeMap<String, String>,
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        ValidationErrorResponse {
            errors: errors
                .errors
                .into_iter()
                .map(|error| (error.field.to_string(), error.message.to_string()))
                .collect(),
        }
    }
}

/// Submit Registration Handler
///
/// Validates the form, stores the lead and forwards it to the automation webhook.
#[endpoint(
    tags("registrations"),
    summary = "Submit Registration",
    responses(
        (status_code = StatusCode::CREATED, description = "Registration recorded"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid form fields"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegistrationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let submission = match RegistrationForm::from(json.into_inner()).validate() {
        Ok(submission) => submission,
        Err(errors) => {
            record_registration_submission(SubmissionOutcome::Invalid);

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY)
                .render(Json(ValidationErrorResponse::from(errors)));

            return Ok(());
        }
    };

    let receipt = state
        .app
        .submissions
        .record_submission(submission)
        .await
        .inspect_err(|_| record_registration_submission(SubmissionOutcome::Failed))
        .map_err(into_status_error)?;

    record_registration_submission(SubmissionOutcome::Recorded);

    res.status_code(StatusCode::CREATED)
        .render(Json(RegistrationCreatedResponse {
            registration_id: receipt.registration.into(),
            timestamp: receipt.submitted_at.to_string(),
        }));

    Ok(())
}

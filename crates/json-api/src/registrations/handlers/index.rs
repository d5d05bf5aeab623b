//! Admin Registration Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use academy_app::domain::registrations::records::RegistrationRecord;

use crate::{extensions::*, registrations::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegistrationResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: Option<String>,
    pub vat_number: Option<String>,
    pub course_selection: String,
    pub number_of_seats: u8,

    /// `pending`, `invoiced` or `paid`
    pub status: String,
    pub submission_date: String,
}

impl From<RegistrationRecord> for RegistrationResponse {
    fn from(registration: RegistrationRecord) -> Self {
        RegistrationResponse {
            uuid: registration.uuid.into(),
            name: registration.name,
            email: registration.email,
            phone: registration.phone,
            company_name: registration.company_name,
            vat_number: registration.vat_number,
            course_selection: registration.course_selection,
            number_of_seats: registration.number_of_seats,
            status: registration.status.to_string(),
            submission_date: registration.submission_date.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegistrationsResponse {
    /// Newest first
    pub registrations: Vec<RegistrationResponse>,
}

/// Admin Registration Index Handler
#[endpoint(
    tags("admin"),
    summary = "List Registrations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RegistrationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let registrations = state
        .app
        .registrations
        .list_registrations()
        .await
        .map_err(into_status_error)?;

    Ok(Json(RegistrationsResponse {
        registrations: registrations.into_iter().map(Into::into).collect(),
    }))
}

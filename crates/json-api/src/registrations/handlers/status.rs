//! Registration Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use academy_app::domain::registrations::status::RegistrationStatus;

use crate::{
    extensions::*,
    registrations::{errors::into_status_error, index::RegistrationResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// `invoiced` or `paid`
    pub status: String,
}

/// Registration Status Handler
///
/// Moves a registration forward through pending, invoiced and paid.
#[endpoint(
    tags("admin"),
    summary = "Update Registration Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Registration not found"),
        (status_code = StatusCode::CONFLICT, description = "Status cannot move backwards"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    registration: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<RegistrationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let status = json
        .into_inner()
        .status
        .parse::<RegistrationStatus>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let registration = state
        .app
        .registrations
        .update_status(registration.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        admin = %admin.uuid,
        registration = %registration.uuid,
        %status,
        "registration status updated"
    );

    Ok(Json(registration.into()))
}

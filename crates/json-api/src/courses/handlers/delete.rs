//! Delete Course Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{courses::errors::into_status_error, extensions::*, state::State};

/// Delete Course Handler
#[endpoint(
    tags("admin"),
    summary = "Delete Course",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Course deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Course not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    course: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .courses
        .delete_course(course.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

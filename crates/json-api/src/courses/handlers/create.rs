//! Create Course Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::JsonBody,
    prelude::*,
};

use crate::{
    courses::{
        errors::into_status_error,
        models::{CourseRequest, CourseResponse},
    },
    extensions::*,
    state::State,
};

/// Create Course Handler
#[endpoint(
    tags("admin"),
    summary = "Create Course",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Course created"),
        (status_code = StatusCode::CONFLICT, description = "Course code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CourseRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CourseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let course = state
        .app
        .courses
        .create_course(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/admin/courses/{}", course.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(course.into()))
}

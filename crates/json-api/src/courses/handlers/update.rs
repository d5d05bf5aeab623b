//! Update Course Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    courses::{
        errors::into_status_error,
        models::{CourseRequest, CourseResponse},
    },
    extensions::*,
    state::State,
};

/// Update Course Handler
///
/// Replaces every editable field.
#[endpoint(
    tags("admin"),
    summary = "Update Course",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Course updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Course not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "courses.update",
    skip(course, json, depot),
    fields(course_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    course: PathParam<Uuid>,
    json: JsonBody<CourseRequest>,
    depot: &mut Depot,
) -> Result<Json<CourseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let course = course.into_inner();

    tracing::Span::current().record("course_uuid", tracing::field::display(course));

    let course = state
        .app
        .courses
        .update_course(course.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(course_code = %course.details.course_code, "updated course");

    Ok(Json(course.into()))
}

//! Admin Course Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    courses::{errors::into_status_error, models::CourseResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CoursesResponse {
    /// Every stored course, ordered by course code
    pub courses: Vec<CourseResponse>,
}

/// Admin Course Index Handler
#[endpoint(
    tags("admin"),
    summary = "List Stored Courses",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CoursesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let courses = state
        .app
        .courses
        .list_courses()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CoursesResponse {
        courses: courses.into_iter().map(Into::into).collect(),
    }))
}

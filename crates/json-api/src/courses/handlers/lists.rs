//! Course List Edit Handler

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

use academy_app::domain::courses::data::{CourseListField, ListEdit};

use crate::{
    courses::{errors::into_status_error, models::CourseResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ListOperation {
    Add,
    Set,
    Remove,
}

/// One change to a course list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListEditRequest {
    pub op: ListOperation,

    /// `target_audience`, `learning_outcomes`, `key_topics` or `assessment`
    pub field: String,

    /// Position for `set` and `remove`
    pub index: Option<usize>,

    /// New text for `add` and `set`
    pub value: Option<String>,
}

impl TryFrom<ListEditRequest> for ListEdit {
    type Error = StatusError;

    fn try_from(request: ListEditRequest) -> Result<Self, Self::Error> {
        let field = request
            .field
            .parse::<CourseListField>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        let missing = |name: &str| {
            StatusError::bad_request().brief(format!("\"{name}\" is required for this edit"))
        };

        match request.op {
            ListOperation::Add => Ok(ListEdit::Add {
                field,
                value: request.value.ok_or_else(|| missing("value"))?,
            }),
            ListOperation::Set => Ok(ListEdit::Set {
                field,
                index: request.index.ok_or_else(|| missing("index"))?,
                value: request.value.ok_or_else(|| missing("value"))?,
            }),
            ListOperation::Remove => Ok(ListEdit::Remove {
                field,
                index: request.index.ok_or_else(|| missing("index"))?,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EditListsRequest {
    /// Applied in order; none are kept if one fails
    pub edits: Vec<ListEditRequest>,
}

/// Course List Edit Handler
#[endpoint(
    tags("admin"),
    summary = "Edit Course Lists",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Lists updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Course not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    course: PathParam<Uuid>,
    json: JsonBody<EditListsRequest>,
    depot: &mut Depot,
) -> Result<Json<CourseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let edits = json
        .into_inner()
        .edits
        .into_iter()
        .map(ListEdit::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let course = state
        .app
        .courses
        .edit_lists(course.into_inner().into(), edits)
        .await
        .map_err(into_status_error)?;

    Ok(Json(course.into()))
}

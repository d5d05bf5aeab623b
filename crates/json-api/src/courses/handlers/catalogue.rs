//! Public Course Catalogue Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use academy_app::domain::courses::catalogue::catalogue_from;

use crate::{courses::models::CatalogueCourseResponse, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogueResponse {
    /// Courses open for registration
    pub courses: Vec<CatalogueCourseResponse>,
}

/// Public Course Catalogue Handler
///
/// Lists stored courses, or the built-in courses when none can be read.
#[endpoint(tags("courses"), summary = "List Courses")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CatalogueResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let catalogue = catalogue_from(state.app.courses.list_courses().await);

    Ok(Json(CatalogueResponse {
        courses: catalogue.into_iter().map(Into::into).collect(),
    }))
}

//! Admin Dashboard Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    auth::into_status_error, extensions::*, session::create::AdminResponse, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DashboardResponse {
    pub admin: AdminResponse,

    /// When this admin last opened the dashboard, before this visit
    pub last_dashboard_view: Option<String>,
}

/// Admin Dashboard Handler
///
/// Records the visit and returns the previous one, so new registrations can be highlighted.
#[endpoint(
    tags("admin"),
    summary = "Open Dashboard",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DashboardResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let previous = state
        .app
        .auth
        .record_dashboard_view(admin.uuid, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(DashboardResponse {
        admin: admin.into(),
        last_dashboard_view: previous.as_ref().map(ToString::to_string),
    }))
}

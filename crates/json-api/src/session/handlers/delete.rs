//! Sign Out Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{into_status_error, middleware::extract_bearer_token},
    extensions::*,
    state::State,
};

/// Sign Out Handler
///
/// Revokes the bearer token's session with the hosted auth service.
#[endpoint(
    tags("admin"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Signed out"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
    ),
)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = extract_bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Missing or invalid Authorization header"))?;

    state
        .app
        .auth
        .sign_out(token)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

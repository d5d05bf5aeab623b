//! Sign In Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use academy_app::{
    auth::{AdminUser, Credentials},
    secret::Secret,
};

use crate::{auth::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl From<SignInRequest> for Credentials {
    fn from(request: SignInRequest) -> Self {
        Credentials {
            email: request.email.trim().to_string(),
            password: Secret::from(request.password),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminResponse {
    pub uuid: Uuid,
    pub email: String,
}

impl From<&AdminUser> for AdminResponse {
    fn from(admin: &AdminUser) -> Self {
        AdminResponse {
            uuid: admin.uuid.into(),
            email: admin.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Send as `Authorization: Bearer <access_token>`
    pub access_token: String,
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: u64,
    pub admin: AdminResponse,
}

/// Sign In Handler
#[endpoint(
    tags("admin"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Bad credentials or not an admin"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Auth service unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignInRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let signed_in = state
        .app
        .auth
        .sign_in(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(SessionResponse {
        access_token: signed_in.session.access_token.expose().to_string(),
        refresh_token: signed_in.session.refresh_token.expose().to_string(),
        expires_in: signed_in.session.expires_in,
        admin: (&signed_in.admin).into(),
    }))
}

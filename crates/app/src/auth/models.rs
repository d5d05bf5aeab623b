//! Auth data models.

use jiff::Timestamp;
use serde::Deserialize;
use uuid::Uuid;

use crate::{secret::Secret, uuids::TypedUuid};

/// Admin user UUID. Same value as the hosted auth user id.
pub type AdminUserUuid = TypedUuid<AdminUser>;

/// Email/password pair for the password grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: Secret,
}

/// A user as the hosted auth service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostedUser {
    pub id: Uuid,

    #[serde(default)]
    pub email: String,
}

/// Tokens issued by the hosted auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: Secret,
    pub refresh_token: Secret,

    /// Access token lifetime in seconds.
    pub expires_in: u64,

    pub user: HostedUser,
}

/// A hosted auth user allowed into the admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub uuid: AdminUserUuid,
    pub email: String,
    pub last_dashboard_view: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A signed-in admin and their tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub session: AuthSession,
    pub admin: AdminUser,
}

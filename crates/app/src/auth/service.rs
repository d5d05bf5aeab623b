//! Auth service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    auth::{
        AdminSession, AdminUser, AdminUserUuid, AuthServiceError, Credentials, IdentityProvider,
        repository::PgAdminUsersRepository,
    },
    database::Db,
};

#[derive(Clone)]
pub struct PgAuthService {
    repository: PgAdminUsersRepository,
    identity: Arc<dyn IdentityProvider>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: &Db, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            repository: PgAdminUsersRepository::new(db.pool().clone()),
            identity,
        }
    }

    async fn admin_for(&self, user: AdminUserUuid) -> Result<AdminUser, AuthServiceError> {
        self.repository
            .find_admin(user)
            .await?
            .ok_or(AuthServiceError::NotAdmin)
    }
}

impl fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgAuthService")
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn sign_in(&self, credentials: Credentials) -> Result<AdminSession, AuthServiceError> {
        let session = self.identity.sign_in(&credentials).await?;

        let admin = match self.admin_for(session.user.id.into()).await {
            Ok(admin) => admin,
            Err(error) => {
                if let Err(sign_out) = self.identity.sign_out(session.access_token.expose()).await
                {
                    warn!(error = %sign_out, "failed to revoke session of rejected user");
                }

                return Err(error);
            }
        };

        info!(admin = %admin.uuid, "admin signed in");

        Ok(AdminSession { session, admin })
    }

    async fn authenticate(&self, access_token: &str) -> Result<AdminUser, AuthServiceError> {
        let user = self.identity.user(access_token).await?;

        self.admin_for(user.id.into()).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthServiceError> {
        self.identity.sign_out(access_token).await?;

        Ok(())
    }

    async fn record_dashboard_view(
        &self,
        admin: AdminUserUuid,
        now: Timestamp,
    ) -> Result<Option<Timestamp>, AuthServiceError> {
        self.repository
            .touch_dashboard_view(admin, now)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Password sign-in. Users without an admin row are signed straight back
    /// out and rejected.
    async fn sign_in(&self, credentials: Credentials) -> Result<AdminSession, AuthServiceError>;

    /// Resolve a bearer access token to an admin.
    async fn authenticate(&self, access_token: &str) -> Result<AdminUser, AuthServiceError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthServiceError>;

    /// Stamp the admin's dashboard visit and return the previous one.
    async fn record_dashboard_view(
        &self,
        admin: AdminUserUuid,
        now: Timestamp,
    ) -> Result<Option<Timestamp>, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        auth::{AuthSession, HostedAuthError, HostedUser, MockIdentityProvider},
        secret::Secret,
        test::TestContext,
    };

    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            email: "admin@example.com".to_string(),
            password: Secret::new("correct horse"),
        }
    }

    fn session(user: Uuid) -> AuthSession {
        AuthSession {
            access_token: Secret::new("access-token"),
            refresh_token: Secret::new("refresh-token"),
            expires_in: 3600,
            user: HostedUser {
                id: user,
                email: "admin@example.com".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn sign_in_returns_admin_session() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        ctx.admins
            .grant_admin(user.into(), "admin@example.com")
            .await?;

        let mut identity = MockIdentityProvider::new();

        identity
            .expect_sign_in()
            .once()
            .return_once(move |_| Ok(session(user)));

        identity.expect_sign_out().never();

        let service = PgAuthService::new(&ctx.db_handle(), Arc::new(identity));
        let signed_in = service.sign_in(credentials()).await?;

        assert_eq!(signed_in.admin.uuid, AdminUserUuid::from_uuid(user));
        assert_eq!(signed_in.session.access_token.expose(), "access-token");

        Ok(())
    }

    #[tokio::test]
    async fn sign_in_rejects_and_signs_out_non_admins() -> TestResult {
        let ctx = TestContext::new().await;
        let user = Uuid::now_v7();

        let mut identity = MockIdentityProvider::new();

        identity
            .expect_sign_in()
            .once()
            .return_once(move |_| Ok(session(user)));

        identity
            .expect_sign_out()
            .with(eq("access-token"))
            .once()
            .return_once(|_| Ok(()));

        let service = PgAuthService::new(&ctx.db_handle(), Arc::new(identity));
        let result = service.sign_in(credentials()).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotAdmin)),
            "expected NotAdmin, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn bad_password_never_touches_admin_users() -> TestResult {
        let ctx = TestContext::new().await;

        let mut identity = MockIdentityProvider::new();

        identity
            .expect_sign_in()
            .once()
            .return_once(|_| Err(HostedAuthError::InvalidCredentials));

        identity.expect_sign_out().never();

        let service = PgAuthService::new(&ctx.db_handle(), Arc::new(identity));
        let result = service.sign_in(credentials()).await;

        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_requires_admin_row() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = Uuid::now_v7();
        let stranger = Uuid::now_v7();

        ctx.admins
            .grant_admin(admin.into(), "admin@example.com")
            .await?;

        let mut identity = MockIdentityProvider::new();

        identity
            .expect_user()
            .with(eq("admin-token"))
            .return_once(move |_| {
                Ok(HostedUser {
                    id: admin,
                    email: "admin@example.com".to_string(),
                })
            });

        identity
            .expect_user()
            .with(eq("stranger-token"))
            .return_once(move |_| {
                Ok(HostedUser {
                    id: stranger,
                    email: "stranger@example.com".to_string(),
                })
            });

        identity
            .expect_user()
            .with(eq("expired-token"))
            .return_once(|_| Err(HostedAuthError::Unauthorized));

        let service = PgAuthService::new(&ctx.db_handle(), Arc::new(identity));

        assert_eq!(
            service.authenticate("admin-token").await?.uuid,
            AdminUserUuid::from_uuid(admin)
        );

        assert!(matches!(
            service.authenticate("stranger-token").await,
            Err(AuthServiceError::NotAdmin)
        ));

        assert!(matches!(
            service.authenticate("expired-token").await,
            Err(AuthServiceError::Unauthorized)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn dashboard_view_returns_previous_visit() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = AdminUserUuid::new();

        ctx.admins.grant_admin(admin, "admin@example.com").await?;

        let first: Timestamp = "2026-03-01T09:00:00Z".parse()?;
        let second: Timestamp = "2026-03-02T09:00:00Z".parse()?;

        assert_eq!(ctx.auth.record_dashboard_view(admin, first).await?, None);
        assert_eq!(
            ctx.auth.record_dashboard_view(admin, second).await?,
            Some(first)
        );

        Ok(())
    }

    #[tokio::test]
    async fn dashboard_view_for_unknown_admin_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .auth
            .record_dashboard_view(AdminUserUuid::new(), Timestamp::now())
            .await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn grant_is_idempotent_and_revoke_removes_access() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = AdminUserUuid::new();

        ctx.admins.grant_admin(admin, "old@example.com").await?;

        let updated = ctx.admins.grant_admin(admin, "new@example.com").await?;

        assert_eq!(updated.email, "new@example.com");
        assert_eq!(ctx.admins.revoke_admin(admin).await?, 1);
        assert_eq!(ctx.admins.find_admin(admin).await?, None);
        assert_eq!(ctx.admins.revoke_admin(admin).await?, 0);

        Ok(())
    }
}

//! Admin users repository.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::auth::models::{AdminUser, AdminUserUuid};

const FIND_ADMIN_USER_SQL: &str = include_str!("sql/find_admin_user.sql");
const GRANT_ADMIN_USER_SQL: &str = include_str!("sql/grant_admin_user.sql");
const REVOKE_ADMIN_USER_SQL: &str = include_str!("sql/revoke_admin_user.sql");
const TOUCH_DASHBOARD_VIEW_SQL: &str = include_str!("sql/touch_dashboard_view.sql");

/// Storage for the `admin_users` allow-list.
#[derive(Debug, Clone)]
pub struct PgAdminUsersRepository {
    pool: PgPool,
}

impl PgAdminUsersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_admin(
        &self,
        admin: AdminUserUuid,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        query_as::<Postgres, AdminUser>(FIND_ADMIN_USER_SQL)
            .bind(admin.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn grant_admin(
        &self,
        admin: AdminUserUuid,
        email: &str,
    ) -> Result<AdminUser, sqlx::Error> {
        query_as::<Postgres, AdminUser>(GRANT_ADMIN_USER_SQL)
            .bind(admin.into_uuid())
            .bind(email)
            .fetch_one(&self.pool)
            .await
    }

    /// Returns the number of rows removed.
    pub async fn revoke_admin(&self, admin: AdminUserUuid) -> Result<u64, sqlx::Error> {
        query(REVOKE_ADMIN_USER_SQL)
            .bind(admin.into_uuid())
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
    }

    /// Set `last_dashboard_view` to `now`, returning the value it replaced.
    pub async fn touch_dashboard_view(
        &self,
        admin: AdminUserUuid,
        now: Timestamp,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        query_scalar::<Postgres, Option<SqlxTimestamp>>(TOUCH_DASHBOARD_VIEW_SQL)
            .bind(admin.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&self.pool)
            .await
            .map(|previous| previous.map(SqlxTimestamp::to_jiff))
    }
}

impl<'r> FromRow<'r, PgRow> for AdminUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AdminUserUuid::from_uuid(row.try_get("id")?),
            email: row.try_get("email")?,
            last_dashboard_view: row
                .try_get::<Option<SqlxTimestamp>, _>("last_dashboard_view")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

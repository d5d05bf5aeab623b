//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    auth::{MockIdentityProvider, PgAdminUsersRepository, PgAuthService},
    database::Db,
    domain::{
        audit::PgAuditLog, courses::PgCoursesService, registrations::PgRegistrationsService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub registrations: PgRegistrationsService,
    pub courses: PgCoursesService,
    pub audit: PgAuditLog,

    /// Admin bookkeeping only. The identity provider has no expectations, so
    /// sign-in tests build their own service around a configured mock.
    pub auth: PgAuthService,
    pub admins: PgAdminUsersRepository,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            registrations: PgRegistrationsService::new(db.clone()),
            courses: PgCoursesService::new(db.clone()),
            audit: PgAuditLog::new(&db),
            auth: PgAuthService::new(&db, Arc::new(MockIdentityProvider::new())),
            admins: PgAdminUsersRepository::new(db.pool().clone()),
            db: test_db,
        }
    }

    /// A fresh [`Db`] handle on the test database.
    pub fn db_handle(&self) -> Db {
        Db::new(self.db.pool().clone())
    }
}

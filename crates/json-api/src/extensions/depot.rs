//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use academy_app::auth::AdminUser;

const ADMIN_DEPOT_KEY: &str = "admin_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}

/// The admin resolved by the auth middleware.
pub(crate) trait AdminDepotExt {
    fn insert_admin(&mut self, admin: AdminUser);

    fn admin_or_401(&self) -> Result<&AdminUser, StatusError>;
}

impl AdminDepotExt for Depot {
    fn insert_admin(&mut self, admin: AdminUser) {
        self.insert(ADMIN_DEPOT_KEY, admin);
    }

    fn admin_or_401(&self) -> Result<&AdminUser, StatusError> {
        self.get::<AdminUser>(ADMIN_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

//! Registrations service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::registrations::{
        data::NewRegistration,
        errors::RegistrationsServiceError,
        records::{RegistrationRecord, RegistrationUuid},
        repository::PgRegistrationsRepository,
        status::RegistrationStatus,
    },
};

#[derive(Debug, Clone)]
pub struct PgRegistrationsService {
    db: Db,
    repository: PgRegistrationsRepository,
}

impl PgRegistrationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgRegistrationsRepository::new(db.pool().clone()),
            db,
        }
    }
}

#[async_trait]
impl RegistrationsService for PgRegistrationsService {
    async fn list_registrations(&self) -> Result<Vec<RegistrationRecord>, RegistrationsServiceError> {
        self.repository
            .list_registrations()
            .await
            .map_err(Into::into)
    }

    async fn create_registration(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationRecord, RegistrationsServiceError> {
        self.repository
            .create_registration(registration)
            .await
            .map_err(Into::into)
    }

    async fn update_status(
        &self,
        registration: RegistrationUuid,
        status: RegistrationStatus,
    ) -> Result<RegistrationRecord, RegistrationsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_registration_for_update(&mut tx, registration)
            .await?;

        if !current.status.can_advance_to(status) {
            return Err(RegistrationsServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self
            .repository
            .update_status(&mut tx, registration, status)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait RegistrationsService: Send + Sync {
    /// Every registration, newest first.
    async fn list_registrations(&self) -> Result<Vec<RegistrationRecord>, RegistrationsServiceError>;

    /// Inserts a new `pending` registration.
    async fn create_registration(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationRecord, RegistrationsServiceError>;

    /// Moves a registration forward through the invoicing pipeline.
    async fn update_status(
        &self,
        registration: RegistrationUuid,
        status: RegistrationStatus,
    ) -> Result<RegistrationRecord, RegistrationsServiceError>;
}

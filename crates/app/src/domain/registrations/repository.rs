//! Registrations Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::registrations::{
    data::NewRegistration,
    records::{RegistrationRecord, RegistrationUuid},
    status::RegistrationStatus,
};

const LIST_REGISTRATIONS_SQL: &str = include_str!("sql/list_registrations.sql");
const GET_REGISTRATION_SQL: &str = include_str!("sql/get_registration.sql");
const CREATE_REGISTRATION_SQL: &str = include_str!("sql/create_registration.sql");
const UPDATE_REGISTRATION_STATUS_SQL: &str = include_str!("sql/update_registration_status.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgRegistrationsRepository {
    pool: PgPool,
}

impl PgRegistrationsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list_registrations(&self) -> Result<Vec<RegistrationRecord>, sqlx::Error> {
        query_as::<Postgres, RegistrationRecord>(LIST_REGISTRATIONS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn create_registration(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationRecord, sqlx::Error> {
        query_as::<Postgres, RegistrationRecord>(CREATE_REGISTRATION_SQL)
            .bind(RegistrationUuid::new().into_uuid())
            .bind(registration.name)
            .bind(registration.email)
            .bind(registration.phone)
            .bind(registration.company_name)
            .bind(registration.vat_number)
            .bind(registration.course_selection)
            .bind(i32::from(registration.number_of_seats))
            .bind(SqlxTimestamp::from(registration.submission_date))
            .fetch_one(&self.pool)
            .await
    }

    /// Fetch a registration and lock its row for the rest of the transaction.
    pub(crate) async fn get_registration_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        registration: RegistrationUuid,
    ) -> Result<RegistrationRecord, sqlx::Error> {
        query_as::<Postgres, RegistrationRecord>(GET_REGISTRATION_SQL)
            .bind(registration.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        registration: RegistrationUuid,
        status: RegistrationStatus,
    ) -> Result<RegistrationRecord, sqlx::Error> {
        query_as::<Postgres, RegistrationRecord>(UPDATE_REGISTRATION_STATUS_SQL)
            .bind(registration.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RegistrationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let seats_i32: i32 = row.try_get("number_of_seats")?;

        let number_of_seats = u8::try_from(seats_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "number_of_seats".to_string(),
            source: Box::new(e),
        })?;

        let status = row
            .try_get::<String, _>("status")?
            .parse::<RegistrationStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: RegistrationUuid::from_uuid(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            company_name: row.try_get("company_name")?,
            vat_number: row.try_get("vat_number")?,
            course_selection: row.try_get("course_selection")?,
            number_of_seats,
            status,
            submission_date: row
                .try_get::<SqlxTimestamp, _>("submission_date")?
                .to_jiff(),
        })
    }
}

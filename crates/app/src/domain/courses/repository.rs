//! Courses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    Executor, FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as,
};

use crate::domain::courses::{
    data::CourseDraft,
    records::{CourseRecord, CourseUuid},
};

const LIST_COURSES_SQL: &str = include_str!("sql/list_courses.sql");
const GET_COURSE_SQL: &str = include_str!("sql/get_course.sql");
const CREATE_COURSE_SQL: &str = include_str!("sql/create_course.sql");
const UPSERT_COURSE_SQL: &str = include_str!("sql/upsert_course.sql");
const UPDATE_COURSE_SQL: &str = include_str!("sql/update_course.sql");
const DELETE_COURSE_SQL: &str = include_str!("sql/delete_course.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgCoursesRepository {
    pool: PgPool,
}

impl PgCoursesRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list_courses(&self) -> Result<Vec<CourseRecord>, sqlx::Error> {
        query_as::<Postgres, CourseRecord>(LIST_COURSES_SQL)
            .fetch_all(&self.pool)
            .await
    }

    /// Fetch a course and lock its row for the rest of the transaction.
    pub(crate) async fn get_course_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
    ) -> Result<CourseRecord, sqlx::Error> {
        query_as::<Postgres, CourseRecord>(GET_COURSE_SQL)
            .bind(course.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_course(
        &self,
        course: CourseUuid,
        draft: CourseDraft,
        credits: i32,
    ) -> Result<CourseRecord, sqlx::Error> {
        write_course(&self.pool, CREATE_COURSE_SQL, course, draft, credits).await
    }

    /// Insert a course, or refresh the stored copy with the same code.
    ///
    /// The stored `upcoming_date` is kept on conflict.
    pub(crate) async fn upsert_course(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        draft: CourseDraft,
        credits: i32,
    ) -> Result<CourseRecord, sqlx::Error> {
        write_course(&mut **tx, UPSERT_COURSE_SQL, CourseUuid::new(), draft, credits).await
    }

    pub(crate) async fn update_course(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
        draft: CourseDraft,
        credits: i32,
    ) -> Result<CourseRecord, sqlx::Error> {
        write_course(&mut **tx, UPDATE_COURSE_SQL, course, draft, credits).await
    }

    pub(crate) async fn delete_course(&self, course: CourseUuid) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_COURSE_SQL)
            .bind(course.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// All course writes share the same bind order: `$1` id, then the draft fields.
async fn write_course<'e, E>(
    executor: E,
    sql: &'static str,
    course: CourseUuid,
    draft: CourseDraft,
    credits: i32,
) -> Result<CourseRecord, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    query_as::<Postgres, CourseRecord>(sql)
        .bind(course.into_uuid())
        .bind(draft.course_code)
        .bind(draft.course_name)
        .bind(draft.upcoming_date)
        .bind(draft.purpose)
        .bind(draft.target_audience)
        .bind(draft.duration)
        .bind(draft.nqf_level)
        .bind(credits)
        .bind(draft.accrediting_body)
        .bind(draft.learning_outcomes)
        .bind(draft.key_topics)
        .bind(draft.assessment)
        .bind(draft.certification)
        .fetch_one(executor)
        .await
}

impl<'r> FromRow<'r, PgRow> for CourseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let credits_i32: i32 = row.try_get("credits")?;

        let credits = u32::try_from(credits_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "credits".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CourseUuid::from_uuid(row.try_get("id")?),
            details: CourseDraft {
                course_code: row.try_get("course_code")?,
                course_name: row.try_get("course_name")?,
                upcoming_date: row.try_get("upcoming_date")?,
                purpose: row.try_get("purpose")?,
                target_audience: row.try_get("target_audience")?,
                duration: row.try_get("duration")?,
                nqf_level: row.try_get("nqf_level")?,
                credits,
                accrediting_body: row.try_get("accrediting_body")?,
                learning_outcomes: row.try_get("learning_outcomes")?,
                key_topics: row.try_get("key_topics")?,
                assessment: row.try_get("assessment")?,
                certification: row.try_get("certification")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

//! Courses service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::courses::{
        catalogue::default_courses,
        data::{CourseDraft, ListEdit},
        errors::CoursesServiceError,
        records::{CourseRecord, CourseUuid},
        repository::PgCoursesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCoursesService {
    db: Db,
    repository: PgCoursesRepository,
}

impl PgCoursesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgCoursesRepository::new(db.pool().clone()),
            db,
        }
    }
}

fn prepare(draft: CourseDraft) -> Result<(CourseDraft, i32), CoursesServiceError> {
    let draft = draft.normalised();

    draft.check()?;

    let credits = i32::try_from(draft.credits)?;

    Ok((draft, credits))
}

#[async_trait]
impl CoursesService for PgCoursesService {
    async fn list_courses(&self) -> Result<Vec<CourseRecord>, CoursesServiceError> {
        self.repository.list_courses().await.map_err(Into::into)
    }

    async fn create_course(&self, draft: CourseDraft) -> Result<CourseRecord, CoursesServiceError> {
        let (draft, credits) = prepare(draft)?;

        self.repository
            .create_course(CourseUuid::new(), draft, credits)
            .await
            .map_err(Into::into)
    }

    async fn update_course(
        &self,
        course: CourseUuid,
        draft: CourseDraft,
    ) -> Result<CourseRecord, CoursesServiceError> {
        let (draft, credits) = prepare(draft)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_course(&mut tx, course, draft, credits)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn edit_lists(
        &self,
        course: CourseUuid,
        edits: Vec<ListEdit>,
    ) -> Result<CourseRecord, CoursesServiceError> {
        let mut tx = self.db.begin().await?;

        let mut draft = self
            .repository
            .get_course_for_update(&mut tx, course)
            .await?
            .details;

        for edit in edits {
            draft.apply(edit)?;
        }

        let (draft, credits) = prepare(draft)?;

        let updated = self
            .repository
            .update_course(&mut tx, course, draft, credits)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_course(&self, course: CourseUuid) -> Result<(), CoursesServiceError> {
        let rows_affected = self.repository.delete_course(course).await?;

        if rows_affected == 0 {
            return Err(CoursesServiceError::NotFound);
        }

        Ok(())
    }

    async fn seed_defaults(&self) -> Result<Vec<CourseRecord>, CoursesServiceError> {
        let mut tx = self.db.begin().await?;
        let mut seeded = Vec::new();

        for draft in default_courses() {
            let (draft, credits) = prepare(draft)?;

            seeded.push(self.repository.upsert_course(&mut tx, draft, credits).await?);
        }

        tx.commit().await?;

        Ok(seeded)
    }
}

#[automock]
#[async_trait]
pub trait CoursesService: Send + Sync {
    /// Every stored course, ordered by course code.
    async fn list_courses(&self) -> Result<Vec<CourseRecord>, CoursesServiceError>;

    async fn create_course(&self, draft: CourseDraft) -> Result<CourseRecord, CoursesServiceError>;

    /// Replace every editable field of a course.
    async fn update_course(
        &self,
        course: CourseUuid,
        draft: CourseDraft,
    ) -> Result<CourseRecord, CoursesServiceError>;

    /// Apply list item edits in order. Nothing is stored if any edit fails.
    async fn edit_lists(
        &self,
        course: CourseUuid,
        edits: Vec<ListEdit>,
    ) -> Result<CourseRecord, CoursesServiceError>;

    async fn delete_course(&self, course: CourseUuid) -> Result<(), CoursesServiceError>;

    /// Upsert the built-in catalogue by course code.
    async fn seed_defaults(&self) -> Result<Vec<CourseRecord>, CoursesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::courses::data::{CourseDraftError, CourseListField},
        test::TestContext,
    };

    use super::*;

    fn draft(code: &str) -> CourseDraft {
        CourseDraft {
            course_code: code.to_string(),
            course_name: "Team Leadership".to_string(),
            upcoming_date: Some("2026-11-03".to_string()),
            credits: 12,
            key_topics: vec!["Delegation".to_string()],
            ..CourseDraft::default()
        }
    }

    #[test]
    fn prepare_rejects_blank_name() {
        let result = prepare(CourseDraft {
            course_name: " ".to_string(),
            ..draft("SP-1")
        });

        assert!(
            matches!(
                result,
                Err(CoursesServiceError::InvalidDraft(CourseDraftError::MissingName))
            ),
            "expected MissingName, got {result:?}"
        );
    }

    #[test]
    fn prepare_rejects_credits_beyond_column_range() {
        let result = prepare(CourseDraft {
            credits: u32::MAX,
            ..draft("SP-1")
        });

        assert!(
            matches!(result, Err(CoursesServiceError::InvalidCredits(_))),
            "expected InvalidCredits, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_and_list_courses_ordered_by_code() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.courses.create_course(draft("SP-300")).await?;
        ctx.courses.create_course(draft("SP-100")).await?;

        let codes: Vec<String> = ctx
            .courses
            .list_courses()
            .await?
            .into_iter()
            .map(|course| course.details.course_code)
            .collect();

        assert_eq!(codes, ["SP-100", "SP-300"]);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.courses.create_course(draft("SP-100")).await?;

        let result = ctx.courses.create_course(draft("SP-100")).await;

        assert!(
            matches!(result, Err(CoursesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn edit_lists_applies_edits_in_order() -> TestResult {
        let ctx = TestContext::new().await;

        let course = ctx.courses.create_course(draft("SP-100")).await?;

        let updated = ctx
            .courses
            .edit_lists(
                course.uuid,
                vec![
                    ListEdit::Add {
                        field: CourseListField::KeyTopics,
                        value: "Coaching".to_string(),
                    },
                    ListEdit::Remove {
                        field: CourseListField::KeyTopics,
                        index: 0,
                    },
                ],
            )
            .await?;

        assert_eq!(updated.details.key_topics, ["Coaching"]);
        assert_eq!(updated.details.upcoming_date.as_deref(), Some("2026-11-03"));

        Ok(())
    }

    #[tokio::test]
    async fn failed_list_edit_stores_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let course = ctx.courses.create_course(draft("SP-100")).await?;

        let result = ctx
            .courses
            .edit_lists(
                course.uuid,
                vec![
                    ListEdit::Add {
                        field: CourseListField::Assessment,
                        value: "Portfolio".to_string(),
                    },
                    ListEdit::Remove {
                        field: CourseListField::KeyTopics,
                        index: 5,
                    },
                ],
            )
            .await;

        assert!(
            matches!(result, Err(CoursesServiceError::InvalidDraft(_))),
            "expected InvalidDraft, got {result:?}"
        );

        let stored = ctx.courses.list_courses().await?;

        assert_eq!(
            stored.first().map(|course| course.details.assessment.len()),
            Some(0)
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_course_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.courses.delete_course(CourseUuid::new()).await;

        assert!(
            matches!(result, Err(CoursesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn seed_defaults_is_repeatable_and_keeps_dates() -> TestResult {
        let ctx = TestContext::new().await;

        let seeded = ctx.courses.seed_defaults().await?;
        let first = seeded.first().ok_or("nothing seeded")?;

        ctx.courses
            .update_course(
                first.uuid,
                CourseDraft {
                    upcoming_date: Some("2027-02-01".to_string()),
                    ..first.details.clone()
                },
            )
            .await?;

        ctx.courses.seed_defaults().await?;

        let courses = ctx.courses.list_courses().await?;

        assert_eq!(courses.len(), 3);
        assert!(
            courses
                .iter()
                .any(|course| course.details.upcoming_date.as_deref() == Some("2027-02-01")),
            "reseeding must keep the admin's date"
        );

        Ok(())
    }
}

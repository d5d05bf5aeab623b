//! Course request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use academy_app::domain::courses::{
    catalogue::CatalogueEntry, data::CourseDraft, records::CourseRecord,
};

/// Every editable course field.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CourseRequest {
    pub course_code: String,
    pub course_name: String,
    pub upcoming_date: Option<String>,
    pub purpose: String,
    pub target_audience: Vec<String>,
    pub duration: String,
    pub nqf_level: String,
    pub credits: u32,
    pub accrediting_body: String,
    pub learning_outcomes: Vec<String>,
    pub key_topics: Vec<String>,
    pub assessment: Vec<String>,
    pub certification: String,
}

impl From<CourseRequest> for CourseDraft {
    fn from(request: CourseRequest) -> Self {
        CourseDraft {
            course_code: request.course_code,
            course_name: request.course_name,
            upcoming_date: request.upcoming_date,
            purpose: request.purpose,
            target_audience: request.target_audience,
            duration: request.duration,
            nqf_level: request.nqf_level,
            credits: request.credits,
            accrediting_body: request.accrediting_body,
            learning_outcomes: request.learning_outcomes,
            key_topics: request.key_topics,
            assessment: request.assessment,
            certification: request.certification,
        }
    }
}

/// A stored course as the admin screens see it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CourseResponse {
    pub uuid: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub upcoming_date: Option<String>,
    pub purpose: String,
    pub target_audience: Vec<String>,
    pub duration: String,
    pub nqf_level: String,
    pub credits: u32,
    pub accrediting_body: String,
    pub learning_outcomes: Vec<String>,
    pub key_topics: Vec<String>,
    pub assessment: Vec<String>,
    pub certification: String,

    /// The date and time the course was created
    pub created_at: String,

    /// The date and time the course was last updated
    pub updated_at: String,
}

impl From<CourseRecord> for CourseResponse {
    fn from(record: CourseRecord) -> Self {
        let course = record.details;

        CourseResponse {
            uuid: record.uuid.into(),
            course_code: course.course_code,
            course_name: course.course_name,
            upcoming_date: course.upcoming_date,
            purpose: course.purpose,
            target_audience: course.target_audience,
            duration: course.duration,
            nqf_level: course.nqf_level,
            credits: course.credits,
            accrediting_body: course.accrediting_body,
            learning_outcomes: course.learning_outcomes,
            key_topics: course.key_topics,
            assessment: course.assessment,
            certification: course.certification,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// A course as listed to the public.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogueCourseResponse {
    /// Course id, or a fixed slug for the built-in courses
    pub id: String,
    pub course_code: String,
    pub course_name: String,

    /// Next intake, or a prompt to get in touch
    pub upcoming_date: String,
    pub purpose: String,
    pub target_audience: Vec<String>,
    pub duration: String,
    pub nqf_level: String,
    pub credits: u32,
    pub accrediting_body: String,
    pub learning_outcomes: Vec<String>,
    pub key_topics: Vec<String>,
    pub assessment: Vec<String>,
    pub certification: String,
}

impl From<CatalogueEntry> for CatalogueCourseResponse {
    fn from(entry: CatalogueEntry) -> Self {
        let upcoming_date = entry.upcoming_date().to_string();
        let course = entry.course;

        CatalogueCourseResponse {
            id: entry.id,
            course_code: course.course_code,
            course_name: course.course_name,
            upcoming_date,
            purpose: course.purpose,
            target_audience: course.target_audience,
            duration: course.duration,
            nqf_level: course.nqf_level,
            credits: course.credits,
            accrediting_body: course.accrediting_body,
            learning_outcomes: course.learning_outcomes,
            key_topics: course.key_topics,
            assessment: course.assessment,
            certification: course.certification,
        }
    }
}

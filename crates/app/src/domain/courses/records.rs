//! Course Records

use jiff::Timestamp;

use crate::{domain::courses::data::CourseDraft, uuids::TypedUuid};

/// Course UUID
pub type CourseUuid = TypedUuid<CourseRecord>;

/// Course Record
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub uuid: CourseUuid,
    pub details: CourseDraft,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

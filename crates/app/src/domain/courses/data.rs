//! Course Data

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Editable course fields, used for both inserts and full updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
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

/// The ordered string lists on a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseListField {
    TargetAudience,
    LearningOutcomes,
    KeyTopics,
    Assessment,
}

impl CourseListField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TargetAudience => "target_audience",
            Self::LearningOutcomes => "learning_outcomes",
            Self::KeyTopics => "key_topics",
            Self::Assessment => "assessment",
        }
    }
}

impl fmt::Display for CourseListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown course list field: {0}")]
pub struct UnknownListField(pub String);

impl FromStr for CourseListField {
    type Err = UnknownListField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "target_audience" => Ok(Self::TargetAudience),
            "learning_outcomes" => Ok(Self::LearningOutcomes),
            "key_topics" => Ok(Self::KeyTopics),
            "assessment" => Ok(Self::Assessment),
            other => Err(UnknownListField(other.to_string())),
        }
    }
}

/// One edit to a course list field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEdit {
    Add {
        field: CourseListField,
        value: String,
    },
    Set {
        field: CourseListField,
        index: usize,
        value: String,
    },
    Remove {
        field: CourseListField,
        index: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourseDraftError {
    #[error("course code is required")]
    MissingCode,

    #[error("course name is required")]
    MissingName,

    #[error("{field} has no item at index {index}")]
    IndexOutOfRange {
        field: CourseListField,
        index: usize,
    },
}

impl CourseDraft {
    /// Check the fields the database refuses to store blank.
    ///
    /// # Errors
    ///
    /// Returns the first missing required field.
    pub fn check(&self) -> Result<(), CourseDraftError> {
        if self.course_code.trim().is_empty() {
            return Err(CourseDraftError::MissingCode);
        }

        if self.course_name.trim().is_empty() {
            return Err(CourseDraftError::MissingName);
        }

        Ok(())
    }

    /// Blank dates are stored as `NULL`.
    #[must_use]
    pub fn normalised(mut self) -> Self {
        self.course_code = self.course_code.trim().to_string();
        self.course_name = self.course_name.trim().to_string();
        self.upcoming_date = self
            .upcoming_date
            .map(|date| date.trim().to_string())
            .filter(|date| !date.is_empty());

        self
    }

    #[must_use]
    pub fn list(&self, field: CourseListField) -> &[String] {
        match field {
            CourseListField::TargetAudience => &self.target_audience,
            CourseListField::LearningOutcomes => &self.learning_outcomes,
            CourseListField::KeyTopics => &self.key_topics,
            CourseListField::Assessment => &self.assessment,
        }
    }

    fn list_mut(&mut self, field: CourseListField) -> &mut Vec<String> {
        match field {
            CourseListField::TargetAudience => &mut self.target_audience,
            CourseListField::LearningOutcomes => &mut self.learning_outcomes,
            CourseListField::KeyTopics => &mut self.key_topics,
            CourseListField::Assessment => &mut self.assessment,
        }
    }

    /// Apply a single list edit in place.
    ///
    /// # Errors
    ///
    /// Returns [`CourseDraftError::IndexOutOfRange`] when `Set` or `Remove`
    /// targets an item that does not exist.
    pub fn apply(&mut self, edit: ListEdit) -> Result<(), CourseDraftError> {
        match edit {
            ListEdit::Add { field, value } => {
                self.list_mut(field).push(value);
            }
            ListEdit::Set {
                field,
                index,
                value,
            } => {
                let item = self
                    .list_mut(field)
                    .get_mut(index)
                    .ok_or(CourseDraftError::IndexOutOfRange { field, index })?;

                *item = value;
            }
            ListEdit::Remove { field, index } => {
                let list = self.list_mut(field);

                if index >= list.len() {
                    return Err(CourseDraftError::IndexOutOfRange { field, index });
                }

                list.remove(index);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn draft() -> CourseDraft {
        CourseDraft {
            course_code: "SP-201201".to_string(),
            course_name: "Job Readiness".to_string(),
            key_topics: vec!["Teamwork".to_string(), "Interview Skills".to_string()],
            ..CourseDraft::default()
        }
    }

    #[test]
    fn add_set_and_remove_items() -> TestResult {
        let mut course = draft();

        course.apply(ListEdit::Add {
            field: CourseListField::KeyTopics,
            value: "Financial Literacy Basics".to_string(),
        })?;

        course.apply(ListEdit::Set {
            field: CourseListField::KeyTopics,
            index: 0,
            value: "Teamwork and Collaboration".to_string(),
        })?;

        course.apply(ListEdit::Remove {
            field: CourseListField::KeyTopics,
            index: 1,
        })?;

        assert_eq!(
            course.list(CourseListField::KeyTopics),
            ["Teamwork and Collaboration", "Financial Literacy Basics"]
        );
        assert!(course.list(CourseListField::Assessment).is_empty());

        Ok(())
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let mut course = draft();

        assert_eq!(
            course.apply(ListEdit::Remove {
                field: CourseListField::Assessment,
                index: 0,
            }),
            Err(CourseDraftError::IndexOutOfRange {
                field: CourseListField::Assessment,
                index: 0,
            })
        );

        assert_eq!(
            course.apply(ListEdit::Set {
                field: CourseListField::KeyTopics,
                index: 2,
                value: "Nope".to_string(),
            }),
            Err(CourseDraftError::IndexOutOfRange {
                field: CourseListField::KeyTopics,
                index: 2,
            })
        );

        assert_eq!(course, draft(), "failed edits must not change the draft");
    }

    #[test]
    fn check_requires_code_and_name() {
        assert_eq!(draft().check(), Ok(()));

        let missing_code = CourseDraft {
            course_code: "  ".to_string(),
            ..draft()
        };

        assert_eq!(missing_code.check(), Err(CourseDraftError::MissingCode));

        let missing_name = CourseDraft {
            course_name: String::new(),
            ..draft()
        };

        assert_eq!(missing_name.check(), Err(CourseDraftError::MissingName));
    }

    #[test]
    fn normalised_drops_blank_dates() {
        let course = CourseDraft {
            upcoming_date: Some("   ".to_string()),
            course_code: " SP-201201 ".to_string(),
            ..draft()
        }
        .normalised();

        assert_eq!(course.upcoming_date, None);
        assert_eq!(course.course_code, "SP-201201");
    }

    #[test]
    fn list_field_names_parse() {
        assert_eq!(
            "learning_outcomes".parse::<CourseListField>(),
            Ok(CourseListField::LearningOutcomes)
        );
        assert!("credits".parse::<CourseListField>().is_err());
    }
}

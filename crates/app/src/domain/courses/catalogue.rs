//! Public course catalogue and the built-in default courses.

use std::fmt::Display;

use tracing::warn;

use crate::domain::courses::{data::CourseDraft, records::CourseRecord};

/// Shown in place of a missing or blank upcoming date.
pub const CONTACT_FOR_DATES: &str = "Contact us for dates";

/// A course as listed to the public.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueEntry {
    /// Database id, or a stable slug for built-in courses.
    pub id: String,
    pub course: CourseDraft,
}

impl CatalogueEntry {
    #[must_use]
    pub fn upcoming_date(&self) -> &str {
        self.course
            .upcoming_date
            .as_deref()
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .unwrap_or(CONTACT_FOR_DATES)
    }
}

impl From<CourseRecord> for CatalogueEntry {
    fn from(record: CourseRecord) -> Self {
        Self {
            id: record.uuid.to_string(),
            course: record.details,
        }
    }
}

/// Build the public catalogue from a course listing.
///
/// Falls back to [`default_catalogue`] when the listing failed or came back empty.
pub fn catalogue_from<E: Display>(listing: Result<Vec<CourseRecord>, E>) -> Vec<CatalogueEntry> {
    match listing {
        Ok(records) if !records.is_empty() => records.into_iter().map(Into::into).collect(),
        Ok(_) => default_catalogue(),
        Err(error) => {
            warn!("could not read courses, serving defaults: {error}");

            default_catalogue()
        }
    }
}

#[must_use]
pub fn default_catalogue() -> Vec<CatalogueEntry> {
    ["job-readiness-default", "workplace-skills-default", "new-venture-default"]
        .into_iter()
        .zip(default_courses())
        .map(|(id, course)| CatalogueEntry {
            id: id.to_string(),
            course,
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// The three courses offered out of the box.
#[must_use]
pub fn default_courses() -> Vec<CourseDraft> {
    vec![
        CourseDraft {
            course_code: "SP-201201".to_string(),
            course_name: "Job Readiness".to_string(),
            upcoming_date: None,
            purpose: "The Workplace Preparation course equips learners with the life skills and \
                      employability skills needed to successfully transition into the workplace. \
                      It focuses on self-awareness, professional conduct, communication, and \
                      resilience, helping learners to adapt and thrive in a work environment."
                .to_string(),
            target_audience: strings(&[
                "Unemployed youth entering the workforce",
                "School leavers or graduates seeking employment",
                "Community beneficiaries supported by employability programmes",
                "Entry-level job seekers who need confidence and work-readiness skills",
            ]),
            duration: "10 days (300 hours)".to_string(),
            nqf_level: "Level 2".to_string(),
            credits: 30,
            accrediting_body: "QCTO".to_string(),
            learning_outcomes: strings(&[
                "Understanding the purpose of work in society and personal growth",
                "Exploring how work impacts individuals, families, and communities",
                "Developing self-awareness, values, strengths, and passions",
                "Adopting positive thinking and building resilience",
                "Mastering job seeking skills including CV writing and applications",
            ]),
            key_topics: strings(&[
                "Why Work and Why You Matter",
                "The Value of Work",
                "Know Yourself to Grow Yourself",
                "Growth Mindset",
                "Job Seeking Skills",
                "Interview Skills",
                "Expectations in the Workplace",
                "Communication Skills",
                "Teamwork",
                "Professionalism",
                "Self-Management",
                "Financial Literacy Basics",
            ]),
            assessment: strings(&[
                "Formative assessments: group work, role-plays, reflection activities",
                "Summative assessments: Portfolio of Evidence (PoE)",
                "Facilitator observation and feedback throughout",
                "Portfolio of evidence compilation",
            ]),
            certification: "Learners who are found competent will receive a QCTO-accredited \
                            Statement of Results and certificate of competence for Workplace \
                            Preparation (SP-201201)."
                .to_string(),
        },
        CourseDraft {
            course_code: "SP-211009".to_string(),
            course_name: "Workplace Essential Skills".to_string(),
            upcoming_date: None,
            purpose: "This course builds learners' ability to operate effectively in diverse \
                      workplaces, focusing on rights, responsibilities, performance, and \
                      teamwork. It strengthens adaptability, communication, and productivity to \
                      meet modern workplace demands. Tailored for SMEs, it covers workplace \
                      culture, labour relations, performance management, and organisational \
                      effectiveness."
                .to_string(),
            target_audience: strings(&[
                "Unemployed youth preparing for employment",
                "Employees seeking to improve workplace competence",
                "Apprentices or interns requiring work-readiness skills",
                "Organisations needing workplace skills training for staff",
            ]),
            duration: "5 days (½ day assessments)".to_string(),
            nqf_level: "Level 4".to_string(),
            credits: 20,
            accrediting_body: "QCTO".to_string(),
            learning_outcomes: strings(&[
                "Understanding workplace environments and their impact on productivity",
                "Mastering employer and employee rights, responsibilities, and safety",
                "Comprehending employment contracts and Basic Conditions of Employment Act",
                "Implementing fair labour practices and anti-discrimination principles",
                "Applying organisational structures and performance management systems",
            ]),
            key_topics: strings(&[
                "Understanding the Workplace Environment",
                "Employer and Employee Responsibilities",
                "Employment Contracts and BCEA essentials",
                "Fair Labour Practices and workplace equity",
                "Organisation of Work and 5S principles",
                "Organisational Structures (functional, divisional, matrix)",
                "Performance Standards and productivity expectations",
                "Performance Management Systems and goal setting",
                "Feedback Systems (360-degree feedback, peer evaluations)",
                "Improving Productivity tools and techniques",
                "Employer Organisations and business chambers",
                "Labour Relations & Dispute Resolution (CCMA processes)",
            ]),
            assessment: strings(&[
                "Formative assessments: case studies, group work, discussions",
                "Summative assessments: Portfolio of Evidence (PoE)",
                "Facilitator-led feedback throughout the programme",
                "Continuous assessment and competency evaluation",
            ]),
            certification: "Learners who are found competent will receive a QCTO-accredited \
                            Statement of Results and certificate of competence for Workplace \
                            Essential Skills (SP-211009)."
                .to_string(),
        },
        CourseDraft {
            course_code: "SP-2110010".to_string(),
            course_name: "New Venture Creation".to_string(),
            upcoming_date: None,
            purpose: "This programme develops entrepreneurial knowledge and skills, enabling \
                      learners to start, manage, and grow sustainable small businesses. It \
                      builds confidence, industry awareness, and innovation capacity. \
                      Importantly, New Venture Creation is not only for aspiring entrepreneurs \
                      who want to launch a business, but also for existing small businesses \
                      seeking to scale, improve operations, and unlock growth opportunities."
                .to_string(),
            target_audience: strings(&[
                "Youth aspiring to become entrepreneurs",
                "Unemployed individuals seeking self-employment",
                "Micro-entrepreneurs looking to stabilise or expand",
                "Beneficiaries in township and rural enterprise programmes",
            ]),
            duration: "10 days (80 hours)".to_string(),
            nqf_level: "Level 2".to_string(),
            credits: 32,
            accrediting_body: "QCTO".to_string(),
            learning_outcomes: strings(&[
                "Understanding what it means to be an entrepreneur and their role in society",
                "Developing traits of successful entrepreneurs including resilience and focus",
                "Identifying personal entrepreneurial type and aligning strengths accordingly",
                "Building self-awareness, passion, and vision as an entrepreneur",
                "Making sound business decisions with confidence",
            ]),
            key_topics: strings(&[
                "Introduction to Entrepreneurship",
                "Characteristics of Entrepreneurs",
                "Types of Entrepreneurs (builders, innovators, specialists, opportunists)",
                "Types of Entrepreneurship (small business, scalable start-ups, large company, social)",
                "Knowing Yourself as an Entrepreneur",
                "Decision-Making & Confidence",
                "Understanding Industry Dynamics (SWOT, PEST, Porter's 5 Forces)",
                "Finding a Business Niche",
                "Identifying Market Opportunities",
                "Exploring New & International Markets",
                "Innovation in Business",
                "Sustaining Business Growth",
            ]),
            assessment: strings(&[
                "Formative assessments: group activities, case studies, self-reflection",
                "Summative assessments: Portfolio of Evidence (PoE)",
                "Continuous feedback from facilitators",
                "Competency-based practical evaluations",
            ]),
            certification: "Learners who are found competent will receive a QCTO-accredited \
                            Statement of Results and certificate of competence for New Venture \
                            Creation (SP-2110010)."
                .to_string(),
        },
    ]
}

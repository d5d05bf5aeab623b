//! Analytics aggregation over the full registration set.

use jiff::{SignedDuration, Timestamp, civil::Date};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::domain::{
    analytics::window::{Window, utc_date},
    courses::records::CourseRecord,
    registrations::{records::RegistrationRecord, status::RegistrationStatus},
};

const WEEK: SignedDuration = SignedDuration::from_hours(7 * 24);

/// `round(part / total * 100)`, rounding halves up. Zero when `total` is zero.
#[must_use]
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }

    u32::try_from((part * 200 + total) / (total * 2)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSlice {
    pub status: RegistrationStatus,
    pub value: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunnelStage {
    pub stage: &'static str,
    pub value: usize,
    pub percentage: u32,
    pub drop_off: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityPoint {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenuePoint {
    pub label: String,
    pub invoiced: usize,
    pub paid: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseDay {
    pub count: usize,
    pub paid: usize,
}

/// One bucket of per-course counts, in the order of [`AnalyticsReport::courses`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePoint {
    pub label: String,
    pub courses: SmallVec<[CourseDay; 4]>,
}

/// A course selection seen in the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSeries {
    pub selection: String,
    /// Catalogue name, when the selection mentions a stored course code.
    pub course_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub window: Window,
    pub total_signups: usize,
    pub weekly_signups: usize,
    pub total_pending: usize,
    pub total_invoiced: usize,
    pub total_paid: usize,
    pub conversion_rate: u32,
    pub status_breakdown: [StatusSlice; 3],
    pub funnel: [FunnelStage; 3],
    pub courses: Vec<CourseSeries>,
    pub recent_activity: Vec<ActivityPoint>,
    pub revenue_over_time: Vec<RevenuePoint>,
    pub course_performance: Vec<CoursePoint>,
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    count: usize,
    invoiced: usize,
    paid: usize,
    courses: SmallVec<[CourseDay; 4]>,
}

fn course_name(selection: &str, courses: &[CourseRecord]) -> Option<String> {
    courses
        .iter()
        .find(|course| {
            let code = course.details.course_code.as_str();

            selection == code || selection.contains(&format!("({code})"))
        })
        .map(|course| course.details.course_name.clone())
}

impl AnalyticsReport {
    /// Aggregate `registrations` over `window`.
    #[must_use]
    pub fn compute(
        registrations: &[RegistrationRecord],
        courses: &[CourseRecord],
        window: &Window,
        now: Timestamp,
    ) -> Self {
        let week_ago = now.checked_sub(WEEK).unwrap_or(Timestamp::MIN);

        let weekly_signups = registrations
            .iter()
            .filter(|registration| registration.submission_date >= week_ago)
            .count();

        let in_window: Vec<&RegistrationRecord> = registrations
            .iter()
            .filter(|registration| window.contains(registration.submission_date))
            .collect();

        let count_status = |status: RegistrationStatus| {
            in_window
                .iter()
                .filter(|registration| registration.status == status)
                .count()
        };

        let total_signups = in_window.len();
        let total_pending = count_status(RegistrationStatus::Pending);
        let total_invoiced = count_status(RegistrationStatus::Invoiced);
        let total_paid = count_status(RegistrationStatus::Paid);

        let status_breakdown = [
            (RegistrationStatus::Pending, total_pending),
            (RegistrationStatus::Invoiced, total_invoiced),
            (RegistrationStatus::Paid, total_paid),
        ]
        .map(|(status, value)| StatusSlice {
            status,
            value,
            percentage: percentage(value, total_signups),
        });

        let funnel = [
            FunnelStage {
                stage: "Sign-ups",
                value: total_signups,
                percentage: 100,
                drop_off: 0,
            },
            FunnelStage {
                stage: "Invoiced",
                value: total_invoiced + total_paid,
                percentage: percentage(total_invoiced + total_paid, total_signups),
                drop_off: percentage(total_pending, total_signups),
            },
            FunnelStage {
                stage: "Paid",
                value: total_paid,
                percentage: percentage(total_paid, total_signups),
                drop_off: percentage(total_invoiced, total_signups),
            },
        ];

        let mut course_index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut series = Vec::new();

        for registration in &in_window {
            let selection = registration.course_selection.as_str();

            if !course_index.contains_key(selection) {
                course_index.insert(selection, series.len());
                series.push(CourseSeries {
                    selection: selection.to_string(),
                    course_name: course_name(selection, courses),
                });
            }
        }

        let days: Vec<Date> = window.bucket_starts().collect();

        let mut buckets = vec![
            Bucket {
                courses: SmallVec::from_elem(CourseDay::default(), series.len()),
                ..Bucket::default()
            };
            days.len()
        ];

        for registration in &in_window {
            let Some(bucket) = window
                .bucket_of(utc_date(registration.submission_date))
                .and_then(|index| buckets.get_mut(index))
            else {
                continue;
            };

            let paid = registration.status == RegistrationStatus::Paid;

            bucket.count += 1;

            match registration.status {
                RegistrationStatus::Invoiced => bucket.invoiced += 1,
                RegistrationStatus::Paid => bucket.paid += 1,
                RegistrationStatus::Pending => {}
            }

            if let Some(course) = course_index
                .get(registration.course_selection.as_str())
                .and_then(|index| bucket.courses.get_mut(*index))
            {
                course.count += 1;
                course.paid += usize::from(paid);
            }
        }

        let skip = window.skip_factor();
        let last = days.len().saturating_sub(1);

        let kept: Vec<(String, Bucket)> = days
            .iter()
            .zip(buckets)
            .enumerate()
            .filter(|(index, _)| index % skip == 0 || *index == last)
            .map(|(_, (day, bucket))| (window.label(*day), bucket))
            .collect();

        let recent_activity = kept
            .iter()
            .map(|(label, bucket)| ActivityPoint {
                label: label.clone(),
                count: bucket.count,
            })
            .collect();

        let revenue_over_time = kept
            .iter()
            .map(|(label, bucket)| RevenuePoint {
                label: label.clone(),
                invoiced: bucket.invoiced,
                paid: bucket.paid,
                total: bucket.invoiced + bucket.paid,
            })
            .collect();

        let course_performance = kept
            .into_iter()
            .map(|(label, bucket)| CoursePoint {
                label,
                courses: bucket.courses,
            })
            .collect();

        Self {
            window: *window,
            total_signups,
            weekly_signups,
            total_pending,
            total_invoiced,
            total_paid,
            conversion_rate: percentage(total_paid, total_signups),
            status_breakdown,
            funnel,
            courses: series,
            recent_activity,
            revenue_over_time,
            course_performance,
        }
    }
}

//! Analytics Report Handler

use std::sync::Arc;

use jiff::{Timestamp, civil::Date};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use academy_app::domain::analytics::{
    report::{
        ActivityPoint, AnalyticsReport, CoursePoint, CourseSeries, FunnelStage, RevenuePoint,
        StatusSlice,
    },
    window::{AnalyticsQuery, TimeRange},
};

use crate::{analytics::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusSliceResponse {
    pub name: String,
    pub status: String,
    pub value: usize,
    pub percentage: u32,
}

impl From<StatusSlice> for StatusSliceResponse {
    fn from(slice: StatusSlice) -> Self {
        StatusSliceResponse {
            name: slice.status.label().to_string(),
            status: slice.status.to_string(),
            value: slice.value,
            percentage: slice.percentage,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FunnelStageResponse {
    pub stage: String,
    pub value: usize,
    pub percentage: u32,
    pub drop_off: u32,
}

impl From<FunnelStage> for FunnelStageResponse {
    fn from(stage: FunnelStage) -> Self {
        FunnelStageResponse {
            stage: stage.stage.to_string(),
            value: stage.value,
            percentage: stage.percentage,
            drop_off: stage.drop_off,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CourseSeriesResponse {
    /// Course selection as submitted
    pub selection: String,
    pub course_name: Option<String>,
}

impl From<CourseSeries> for CourseSeriesResponse {
    fn from(series: CourseSeries) -> Self {
        CourseSeriesResponse {
            selection: series.selection,
            course_name: series.course_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActivityResponse {
    pub date: String,
    pub count: usize,
}

impl From<ActivityPoint> for ActivityResponse {
    fn from(point: ActivityPoint) -> Self {
        ActivityResponse {
            date: point.label,
            count: point.count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RevenueResponse {
    pub date: String,
    pub invoiced: usize,
    pub paid: usize,
    pub total: usize,
}

impl From<RevenuePoint> for RevenueResponse {
    fn from(point: RevenuePoint) -> Self {
        RevenueResponse {
            date: point.label,
            invoiced: point.invoiced,
            paid: point.paid,
            total: point.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CourseDayResponse {
    pub count: usize,
    pub paid: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CoursePerformanceResponse {
    pub date: String,

    /// Per-course figures, in the order of `courses`
    pub courses: Vec<CourseDayResponse>,
}

impl From<CoursePoint> for CoursePerformanceResponse {
    fn from(point: CoursePoint) -> Self {
        CoursePerformanceResponse {
            date: point.label,
            courses: point
                .courses
                .into_iter()
                .map(|day| CourseDayResponse {
                    count: day.count,
                    paid: day.paid,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AnalyticsResponse {
    pub range: String,
    pub start: String,
    pub end: String,

    /// Number of points before chart thinning
    pub num_buckets: usize,

    /// Calendar days folded into each point
    pub bucket_days: usize,
    pub total_signups: usize,
    pub weekly_signups: usize,
    pub total_pending: usize,
    pub total_invoiced: usize,
    pub total_paid: usize,

    /// Paid registrations as a rounded percentage of sign-ups
    pub conversion_rate: u32,
    pub status_breakdown: Vec<StatusSliceResponse>,
    pub funnel: Vec<FunnelStageResponse>,
    pub courses: Vec<CourseSeriesResponse>,
    pub recent_activity: Vec<ActivityResponse>,
    pub revenue_over_time: Vec<RevenueResponse>,
    pub course_performance: Vec<CoursePerformanceResponse>,
}

impl From<AnalyticsReport> for AnalyticsResponse {
    fn from(report: AnalyticsReport) -> Self {
        AnalyticsResponse {
            range: report.window.range.to_string(),
            start: report.window.start.to_string(),
            end: report.window.end.to_string(),
            num_buckets: report.window.num_buckets,
            bucket_days: report.window.bucket_days,
            total_signups: report.total_signups,
            weekly_signups: report.weekly_signups,
            total_pending: report.total_pending,
            total_invoiced: report.total_invoiced,
            total_paid: report.total_paid,
            conversion_rate: report.conversion_rate,
            status_breakdown: report.status_breakdown.into_iter().map(Into::into).collect(),
            funnel: report.funnel.into_iter().map(Into::into).collect(),
            courses: report.courses.into_iter().map(Into::into).collect(),
            recent_activity: report.recent_activity.into_iter().map(Into::into).collect(),
            revenue_over_time: report.revenue_over_time.into_iter().map(Into::into).collect(),
            course_performance: report.course_performance.into_iter().map(Into::into).collect(),
        }
    }
}

fn parse_date(value: Option<String>, name: &str) -> Result<Option<Date>, StatusError> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<Date>())
        .transpose()
        .map_err(|_ignored| {
            StatusError::bad_request().brief(format!("could not parse \"{name}\" as YYYY-MM-DD"))
        })
}

/// Analytics Report Handler
#[endpoint(
    tags("admin"),
    summary = "Registration Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Report for the requested window"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown range or bad dates"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    range: QueryParam<String, false>,
    start: QueryParam<String, false>,
    end: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AnalyticsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let range = range
        .into_inner()
        .map(|range| range.parse::<TimeRange>())
        .transpose()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?
        .unwrap_or_default();

    let query = AnalyticsQuery {
        range,
        start: parse_date(start.into_inner(), "start")?,
        end: parse_date(end.into_inner(), "end")?,
    };

    let report = state
        .app
        .analytics
        .report(query, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(report.into()))
}

use std::sync::Arc;

use academy_app::{
    database::{self, Db},
    domain::{
        analytics::{
            AnalyticsService, RegistrationsAnalyticsService,
            window::{AnalyticsQuery, TimeRange},
        },
        courses::PgCoursesService,
        registrations::PgRegistrationsService,
    },
};
use clap::Args;
use jiff::{Timestamp, civil::Date};

#[derive(Debug, Args)]
pub(crate) struct SummaryArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Look-back range: 7, 30, 90 or all
    #[arg(long, default_value = "30")]
    range: TimeRange,

    /// Custom start date (YYYY-MM-DD); only used together with --end
    #[arg(long)]
    start: Option<Date>,

    /// Custom end date (YYYY-MM-DD), inclusive
    #[arg(long)]
    end: Option<Date>,
}

pub(crate) async fn run(args: SummaryArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);

    let service = RegistrationsAnalyticsService::new(
        Arc::new(PgRegistrationsService::new(db.clone())),
        Arc::new(PgCoursesService::new(db)),
    );

    let query = AnalyticsQuery {
        range: args.range,
        start: args.start,
        end: args.end,
    };

    let report = service
        .report(query, Timestamp::now())
        .await
        .map_err(|error| format!("failed to build report: {error}"))?;

    println!("window: {} .. {}", report.window.start, report.window.end);
    println!("total_signups: {}", report.total_signups);
    println!("weekly_signups: {}", report.weekly_signups);
    println!("pending: {}", report.total_pending);
    println!("invoiced: {}", report.total_invoiced);
    println!("paid: {}", report.total_paid);
    println!("conversion_rate: {}%", report.conversion_rate);

    for stage in &report.funnel {
        println!(
            "funnel {}: {} ({}%, drop-off {}%)",
            stage.stage, stage.value, stage.percentage, stage.drop_off
        );
    }

    for course in &report.courses {
        println!(
            "course: {}",
            course.course_name.as_deref().unwrap_or(&course.selection)
        );
    }

    Ok(())
}

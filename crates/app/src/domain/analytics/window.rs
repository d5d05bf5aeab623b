//! Reporting windows.

use std::{fmt, str::FromStr};

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use thiserror::Error;

/// Preset look-back ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    All,
}

impl TimeRange {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "7",
            Self::Month => "30",
            Self::Quarter => "90",
            Self::All => "all",
        }
    }

    /// Calendar days covered, today included.
    #[must_use]
    pub const fn days_back(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::All => 3650,
        }
    }

    /// Upper bound on the number of day buckets.
    #[must_use]
    pub const fn bucket_cap(self) -> usize {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::All => 365,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = WindowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "7" => Ok(Self::Week),
            "30" => Ok(Self::Month),
            "90" => Ok(Self::Quarter),
            "all" => Ok(Self::All),
            other => Err(WindowError::UnknownRange(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("unknown time range: {0} (expected 7, 30, 90 or all)")]
    UnknownRange(String),

    #[error("start date {start} is after end date {end}")]
    StartAfterEnd { start: Date, end: Date },

    #[error("window is out of the supported date range")]
    OutOfRange,
}

impl From<jiff::Error> for WindowError {
    fn from(_: jiff::Error) -> Self {
        Self::OutOfRange
    }
}

/// What the caller asked for.
///
/// A custom start only applies together with a custom end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub range: TimeRange,
    pub start: Option<Date>,
    pub end: Option<Date>,
}

/// A resolved reporting window.
///
/// Buckets are laid out backwards from the end date, so the last bucket
/// always holds the end date and every instant in `start..=end` falls into
/// exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub range: TimeRange,
    /// Inclusive.
    pub start: Timestamp,
    /// Inclusive.
    pub end: Timestamp,
    /// First calendar day of the first bucket. May precede `start` when the
    /// days do not divide evenly into buckets.
    pub first_day: Date,
    /// Calendar days per bucket.
    pub bucket_days: usize,
    pub num_buckets: usize,
}

fn start_of_day(date: Date) -> Result<Timestamp, WindowError> {
    Ok(date.to_zoned(TimeZone::UTC)?.timestamp())
}

fn end_of_day(date: Date) -> Result<Timestamp, WindowError> {
    Ok(date
        .at(23, 59, 59, 999_999_999)
        .to_zoned(TimeZone::UTC)?
        .timestamp())
}

/// Calendar days from `start` to `end`, both included. Zero when `end` comes
/// first.
fn calendar_days(start: Date, end: Date) -> Result<usize, WindowError> {
    let between = i64::from(start.until(end)?.get_days());

    Ok(usize::try_from(between + 1).unwrap_or(0))
}

impl AnalyticsQuery {
    /// Resolve the query against `now`.
    ///
    /// Presets cover whole UTC days, the last one being today.
    ///
    /// # Errors
    ///
    /// Returns an error when the custom start is after the custom end, or the
    /// dates cannot be represented.
    pub fn window(&self, now: Timestamp) -> Result<Window, WindowError> {
        let end = match self.end {
            Some(end) => end_of_day(end)?,
            None => now,
        };

        let start = match (self.start, self.end) {
            (Some(start), Some(end)) => {
                if start > end {
                    return Err(WindowError::StartAfterEnd { start, end });
                }

                start_of_day(start)?
            }
            _ => start_of_day(
                utc_date(now).checked_sub((self.range.days_back() - 1).days())?,
            )?,
        };

        let end_date = utc_date(end);
        let days = calendar_days(utc_date(start), end_date)?;
        let bucket_days = days.div_ceil(self.range.bucket_cap()).max(1);
        let num_buckets = days.div_ceil(bucket_days);

        let span_days = i64::try_from(num_buckets * bucket_days).unwrap_or(i64::MAX);

        let first_day = end_date.checked_sub((span_days - 1).max(0).days())?;

        Ok(Window {
            range: self.range,
            start,
            end,
            first_day,
            bucket_days,
            num_buckets,
        })
    }
}

impl Window {
    #[must_use]
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Index of the bucket holding `day`, if any.
    #[must_use]
    pub fn bucket_of(&self, day: Date) -> Option<usize> {
        let offset = usize::try_from(self.first_day.until(day).ok()?.get_days()).ok()?;
        let index = offset.checked_div(self.bucket_days)?;

        (index < self.num_buckets).then_some(index)
    }

    /// First calendar day of each bucket, in order.
    pub fn bucket_starts(&self) -> impl Iterator<Item = Date> {
        let step = i64::try_from(self.bucket_days).unwrap_or(1);

        self.first_day.series(step.days()).take(self.num_buckets)
    }

    /// Keep every `skip`-th point (and the last) so charts stay readable.
    #[must_use]
    pub const fn skip_factor(&self) -> usize {
        if self.num_buckets > 60 {
            self.num_buckets.div_ceil(30)
        } else if self.num_buckets > 30 {
            2
        } else {
            1
        }
    }

    #[must_use]
    pub fn label(&self, day: Date) -> String {
        if self.num_buckets > 90 {
            day.strftime("%b %y").to_string()
        } else {
            day.strftime("%b %-d").to_string()
        }
    }
}

#[must_use]
pub fn utc_date(instant: Timestamp) -> Date {
    instant.to_zoned(TimeZone::UTC).date()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn now() -> Result<Timestamp, jiff::Error> {
        "2026-03-15T12:00:00Z".parse()
    }

    fn with_buckets(num_buckets: usize) -> Window {
        Window {
            range: TimeRange::All,
            start: Timestamp::UNIX_EPOCH,
            end: Timestamp::UNIX_EPOCH,
            first_day: date(1970, 1, 1),
            bucket_days: 1,
            num_buckets,
        }
    }

    #[test]
    fn presets_cover_whole_days_up_to_today() -> TestResult {
        let window = AnalyticsQuery::default().window(now()?)?;

        assert_eq!(window.range, TimeRange::Month);
        assert_eq!(window.start, "2026-02-14T00:00:00Z".parse::<Timestamp>()?);
        assert_eq!(window.end, now()?);
        assert_eq!((window.num_buckets, window.bucket_days), (30, 1));
        assert_eq!(window.first_day, date(2026, 2, 14));
        assert_eq!(window.bucket_starts().last(), Some(date(2026, 3, 15)));
        assert_eq!(window.bucket_of(date(2026, 3, 15)), Some(29));
        assert_eq!(window.bucket_of(date(2026, 2, 13)), None);

        Ok(())
    }

    #[test]
    fn all_widens_buckets_to_cover_every_day() -> TestResult {
        let window = AnalyticsQuery {
            range: TimeRange::All,
            ..AnalyticsQuery::default()
        }
        .window(now()?)?;

        assert_eq!(window.num_buckets, 365);
        assert_eq!(window.bucket_days, 10);
        assert_eq!(window.skip_factor(), 13);
        assert_eq!(window.label(date(2026, 1, 25)), "Jan 26");

        let nine_years_ago: Timestamp = "2017-06-01T09:00:00Z".parse()?;

        assert!(window.contains(nine_years_ago));
        assert!(window.bucket_of(utc_date(nine_years_ago)).is_some());
        assert_eq!(window.bucket_of(utc_date(window.start)), Some(0));
        assert_eq!(window.bucket_of(date(2026, 3, 15)), Some(364));

        Ok(())
    }

    #[test]
    fn custom_range_covers_whole_days() -> TestResult {
        let window = AnalyticsQuery {
            range: TimeRange::Month,
            start: Some(date(2026, 3, 1)),
            end: Some(date(2026, 3, 10)),
        }
        .window(now()?)?;

        assert_eq!(window.start, "2026-03-01T00:00:00Z".parse::<Timestamp>()?);
        assert!(window.contains("2026-03-10T23:59:59Z".parse::<Timestamp>()?));
        assert!(!window.contains("2026-03-11T00:00:00Z".parse::<Timestamp>()?));
        assert_eq!(window.num_buckets, 10);
        assert_eq!(window.bucket_starts().last(), Some(date(2026, 3, 10)));

        Ok(())
    }

    #[test]
    fn long_custom_range_is_folded_into_the_cap() -> TestResult {
        let window = AnalyticsQuery {
            range: TimeRange::Week,
            start: Some(date(2026, 3, 1)),
            end: Some(date(2026, 3, 10)),
        }
        .window(now()?)?;

        assert_eq!((window.num_buckets, window.bucket_days), (5, 2));
        assert_eq!(window.bucket_of(date(2026, 3, 1)), Some(0));
        assert_eq!(window.bucket_of(date(2026, 3, 10)), Some(4));

        Ok(())
    }

    #[test]
    fn custom_start_without_end_keeps_preset() -> TestResult {
        let window = AnalyticsQuery {
            range: TimeRange::Week,
            start: Some(date(2025, 1, 1)),
            end: None,
        }
        .window(now()?)?;

        assert_eq!(window.start, "2026-03-09T00:00:00Z".parse::<Timestamp>()?);
        assert_eq!(window.num_buckets, 7);

        Ok(())
    }

    #[test]
    fn custom_end_without_start_keeps_preset_start() -> TestResult {
        let window = AnalyticsQuery {
            range: TimeRange::Week,
            start: None,
            end: Some(date(2026, 3, 10)),
        }
        .window(now()?)?;

        assert_eq!(window.start, "2026-03-09T00:00:00Z".parse::<Timestamp>()?);
        assert_eq!(window.num_buckets, 2);

        Ok(())
    }

    #[test]
    fn end_before_preset_start_has_no_buckets() -> TestResult {
        let window = AnalyticsQuery {
            range: TimeRange::Week,
            start: None,
            end: Some(date(2026, 1, 1)),
        }
        .window(now()?)?;

        assert_eq!(window.num_buckets, 0);
        assert_eq!(window.bucket_starts().count(), 0);
        assert_eq!(window.bucket_of(date(2026, 1, 1)), None);

        Ok(())
    }

    #[test]
    fn start_after_end_is_rejected() -> TestResult {
        let result = AnalyticsQuery {
            range: TimeRange::Month,
            start: Some(date(2026, 3, 10)),
            end: Some(date(2026, 3, 1)),
        }
        .window(now()?);

        assert_eq!(
            result,
            Err(WindowError::StartAfterEnd {
                start: date(2026, 3, 10),
                end: date(2026, 3, 1),
            })
        );

        Ok(())
    }

    #[test]
    fn skip_factor_thresholds() {
        assert_eq!(with_buckets(30).skip_factor(), 1);
        assert_eq!(with_buckets(31).skip_factor(), 2);
        assert_eq!(with_buckets(60).skip_factor(), 2);
        assert_eq!(with_buckets(61).skip_factor(), 3);
        assert_eq!(with_buckets(90).skip_factor(), 3);
    }

    #[test]
    fn labels_switch_to_month_year_beyond_ninety_buckets() {
        let day = date(2026, 1, 5);

        assert_eq!(with_buckets(90).label(day), "Jan 5");
        assert_eq!(with_buckets(91).label(day), "Jan 26");
    }

    #[test]
    fn ranges_parse() {
        assert_eq!("all".parse::<TimeRange>(), Ok(TimeRange::All));
        assert_eq!("90".parse::<TimeRange>(), Ok(TimeRange::Quarter));
        assert!("14".parse::<TimeRange>().is_err());
    }
}

//! Report query model for the analytics proxy.
//!
//! Every report the dashboard can ask for is one of a closed set of shapes.
//! Date ranges are expressed as the reporting API's relative-day strings so
//! "today" is always resolved in the property's own timezone upstream.

use serde::Serialize;
use thiserror::Error;

/// Minute buckets fetched for the realtime panel: the current 30-minute
/// window plus the 30 minutes before it.
pub const MINUTE_BUCKET_FETCH_LIMIT: usize = 60;

/// Buckets shown per period.
pub const MINUTE_BUCKETS_PER_PERIOD: usize = 30;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid 'type' parameter. Expected 'daily', 'weekly', 'monthly', 'timeseries', or 'last30minutes'.")]
pub struct InvalidReportType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Daily,
    Weekly,
    Monthly,
    Timeseries,
    Last30Minutes,
}

impl ReportType {
    pub fn parse(raw: &str) -> Result<Self, InvalidReportType> {
        match raw {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "timeseries" => Ok(Self::Timeseries),
            "last30minutes" => Ok(Self::Last30Minutes),
            _ => Err(InvalidReportType),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Timeseries => "timeseries",
            Self::Last30Minutes => "last30minutes",
        }
    }

    /// Relative-day date range for this report in the given period.
    ///
    /// The previous period is the same-length window immediately before the
    /// current one. The minute report always queries the current day; period
    /// selection happens when the fetched buckets are sliced.
    pub fn date_range(&self, period: Period) -> DateRange {
        match (self, period) {
            (Self::Daily, Period::Current) => DateRange::new("1daysAgo", "today"),
            (Self::Daily, Period::Previous) => DateRange::new("2daysAgo", "1daysAgo"),
            (Self::Weekly, Period::Current) => DateRange::new("7daysAgo", "today"),
            (Self::Weekly, Period::Previous) => DateRange::new("14daysAgo", "7daysAgo"),
            (Self::Monthly | Self::Timeseries, Period::Current) => {
                DateRange::new("30daysAgo", "today")
            }
            (Self::Monthly | Self::Timeseries, Period::Previous) => {
                DateRange::new("60daysAgo", "30daysAgo")
            }
            (Self::Last30Minutes, _) => DateRange::new("today", "today"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    ActiveUsers,
    AverageEngagementTimePerUser,
}

impl Metric {
    /// Unrecognized metric names fall back to the default rather than
    /// erroring; only the report type is strictly validated.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("averageEngagementTimePerUser") => Self::AverageEngagementTimePerUser,
            _ => Self::ActiveUsers,
        }
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            Self::ActiveUsers => "activeUsers",
            Self::AverageEngagementTimePerUser => "averageEngagementTimePerUser",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Current,
    Previous,
}

impl Period {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("prev") => Self::Previous,
            _ => Self::Current,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: &'static str,
    pub end: &'static str,
}

impl DateRange {
    fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }
}

/// One point of the per-day timeseries. Both metrics are always present;
/// absent or malformed upstream values are coerced to 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeseriesPoint {
    pub date: String,
    #[serde(rename = "activeUsers")]
    pub active_users: i64,
    #[serde(rename = "averageEngagementTimePerUser")]
    pub average_engagement_time_per_user: f64,
}

/// One minute bucket of the realtime panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinutePoint {
    pub minute: String,
    #[serde(rename = "activeUsers")]
    pub active_users: i64,
}

/// Slice the fetched minute buckets down to one period's window.
///
/// `rows` arrive most-recent-first from the source. The current period is
/// buckets 1-30, the previous period buckets 31-60; the selected window is
/// reversed into chronological order for charting.
pub fn slice_minute_buckets(rows: Vec<MinutePoint>, period: Period) -> Vec<MinutePoint> {
    let skip = match period {
        Period::Current => 0,
        Period::Previous => MINUTE_BUCKETS_PER_PERIOD,
    };
    let mut window: Vec<MinutePoint> = rows
        .into_iter()
        .skip(skip)
        .take(MINUTE_BUCKETS_PER_PERIOD)
        .collect();
    window.reverse();
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_valid_types() {
        for raw in ["daily", "weekly", "monthly", "timeseries", "last30minutes"] {
            let parsed = ReportType::parse(raw).expect("valid type");
            assert_eq!(parsed.as_str(), raw);
        }
    }

    #[test]
    fn rejects_unknown_type_with_fixed_message() {
        let err = ReportType::parse("yearly").expect_err("invalid");
        assert_eq!(
            err.to_string(),
            "Invalid 'type' parameter. Expected 'daily', 'weekly', 'monthly', 'timeseries', or 'last30minutes'."
        );
    }

    #[test]
    fn current_period_date_ranges() {
        let cases = [
            (ReportType::Daily, "1daysAgo", "today"),
            (ReportType::Weekly, "7daysAgo", "today"),
            (ReportType::Monthly, "30daysAgo", "today"),
            (ReportType::Timeseries, "30daysAgo", "today"),
            (ReportType::Last30Minutes, "today", "today"),
        ];
        for (report, start, end) in cases {
            let range = report.date_range(Period::Current);
            assert_eq!((range.start, range.end), (start, end), "{report:?}");
        }
    }

    #[test]
    fn previous_period_shifts_back_one_window() {
        let cases = [
            (ReportType::Daily, "2daysAgo", "1daysAgo"),
            (ReportType::Weekly, "14daysAgo", "7daysAgo"),
            (ReportType::Monthly, "60daysAgo", "30daysAgo"),
            (ReportType::Timeseries, "60daysAgo", "30daysAgo"),
        ];
        for (report, start, end) in cases {
            let range = report.date_range(Period::Previous);
            assert_eq!((range.start, range.end), (start, end), "{report:?}");
        }
    }

    #[test]
    fn unknown_metric_falls_back_to_active_users() {
        assert_eq!(Metric::parse(None), Metric::ActiveUsers);
        assert_eq!(Metric::parse(Some("pageviews")), Metric::ActiveUsers);
        assert_eq!(
            Metric::parse(Some("averageEngagementTimePerUser")),
            Metric::AverageEngagementTimePerUser
        );
    }

    #[test]
    fn period_parse_only_recognizes_prev() {
        assert_eq!(Period::parse(None), Period::Current);
        assert_eq!(Period::parse(Some("current")), Period::Current);
        assert_eq!(Period::parse(Some("prev")), Period::Previous);
    }

    fn buckets(n: usize) -> Vec<MinutePoint> {
        // Bucket 0 is the most recent minute.
        (0..n)
            .map(|i| MinutePoint {
                minute: format!("m{i}"),
                active_users: i as i64,
            })
            .collect()
    }

    #[test]
    fn current_minutes_are_first_thirty_in_chronological_order() {
        let sliced = slice_minute_buckets(buckets(60), Period::Current);
        assert_eq!(sliced.len(), 30);
        assert_eq!(sliced[0].minute, "m29");
        assert_eq!(sliced[29].minute, "m0");
    }

    #[test]
    fn previous_minutes_are_buckets_thirty_one_to_sixty() {
        let sliced = slice_minute_buckets(buckets(60), Period::Previous);
        assert_eq!(sliced.len(), 30);
        assert_eq!(sliced[0].minute, "m59");
        assert_eq!(sliced[29].minute, "m30");
    }

    #[test]
    fn short_bucket_list_degrades_to_what_exists() {
        let sliced = slice_minute_buckets(buckets(40), Period::Previous);
        assert_eq!(sliced.len(), 10);
        assert_eq!(sliced[0].minute, "m39");
        assert_eq!(sliced[9].minute, "m30");

        assert!(slice_minute_buckets(Vec::new(), Period::Current).is_empty());
    }
}

//! Request/response shapes for the Data API v1beta `runReport` call.

use serde::{Deserialize, Serialize};

use gkici_core::report::{Metric, Period, ReportType, MINUTE_BUCKET_FETCH_LIMIT};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    pub date_ranges: Vec<ApiDateRange>,
    pub metrics: Vec<MetricRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<DimensionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_bys: Option<Vec<OrderBy>>,
    /// The API takes int64 limits as JSON strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub dimension: DimensionOrderBy,
    pub desc: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionOrderBy {
    pub dimension_name: String,
}

impl RunReportRequest {
    /// Build the upstream request for one report query.
    ///
    /// Aggregate reports carry a single metric (the requested one replaces
    /// the default, never adds to it). The timeseries always requests both
    /// metrics with a per-day breakdown. The minute report breaks the
    /// current day down per minute, newest bucket first, capped at the
    /// two-period fetch window.
    pub fn for_query(report: ReportType, metric: Metric, period: Period) -> Self {
        let range = report.date_range(period);
        let date_ranges = vec![ApiDateRange {
            start_date: range.start.to_string(),
            end_date: range.end.to_string(),
        }];

        match report {
            ReportType::Daily | ReportType::Weekly | ReportType::Monthly => Self {
                date_ranges,
                metrics: vec![MetricRef {
                    name: metric.api_name().to_string(),
                }],
                dimensions: Vec::new(),
                order_bys: None,
                limit: None,
            },
            ReportType::Timeseries => Self {
                date_ranges,
                metrics: vec![
                    MetricRef {
                        name: Metric::ActiveUsers.api_name().to_string(),
                    },
                    MetricRef {
                        name: Metric::AverageEngagementTimePerUser.api_name().to_string(),
                    },
                ],
                dimensions: vec![DimensionRef {
                    name: "date".to_string(),
                }],
                order_bys: None,
                limit: None,
            },
            ReportType::Last30Minutes => Self {
                date_ranges,
                metrics: vec![MetricRef {
                    name: Metric::ActiveUsers.api_name().to_string(),
                }],
                dimensions: vec![DimensionRef {
                    name: "dateHourMinute".to_string(),
                }],
                order_bys: Some(vec![OrderBy {
                    dimension: DimensionOrderBy {
                        dimension_name: "dateHourMinute".to_string(),
                    },
                    desc: true,
                }]),
                limit: Some(MINUTE_BUCKET_FETCH_LIMIT.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunReportResponse {
    pub rows: Vec<ReportRow>,
    pub row_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRow {
    pub dimension_values: Vec<ApiValue>,
    pub metric_values: Vec<ApiValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// Error envelope the API returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use gkici_core::report::{slice_minute_buckets, Metric, Period, ReportType};

use crate::{
    error::AppError,
    ga::normalize,
    ga::types::RunReportRequest,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub metric: Option<String>,
    pub period: Option<String>,
}

/// `GET /api/analytics?type=&metric=&period=` — the report proxy.
///
/// An unknown `type` is rejected before anything goes upstream. Unknown
/// `metric` values fall back to active users; `period=prev` selects the
/// previous window.
pub async fn report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Response, AppError> {
    let report = ReportType::parse(query.report_type.as_deref().unwrap_or(""))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let metric = Metric::parse(query.metric.as_deref());
    let period = Period::parse(query.period.as_deref());

    let request = RunReportRequest::for_query(report, metric, period);
    let response = state.ga.run_report(&request).await?;

    match report {
        ReportType::Timeseries => {
            let data = normalize::timeseries_points(&response);
            Ok(Json(json!({ "data": data })).into_response())
        }
        ReportType::Last30Minutes => {
            let data = slice_minute_buckets(normalize::minute_points(&response), period);
            Ok(Json(json!({ "data": data })).into_response())
        }
        ReportType::Daily | ReportType::Weekly | ReportType::Monthly => {
            let users = normalize::aggregate_count(&response);
            Ok(Json(json!({ "users": normalize::json_number(users) })).into_response())
        }
    }
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use gkici_core::report::{Metric, Period, ReportType};
use gkici_core::trend;

use crate::{
    ga::normalize,
    ga::types::RunReportRequest,
    ga::{GaClient, GaError},
    state::AppState,
};

/// Shown alongside the first failing sub-request's message.
const REMEDIATION_HINT: &str =
    "Pastikan GA_PROPERTY_ID dan GOOGLE_APPLICATION_CREDENTIALS telah diatur dengan benar.";

async fn fetch_count(ga: &GaClient, report: ReportType, period: Period) -> Result<f64, GaError> {
    let request = RunReportRequest::for_query(report, Metric::ActiveUsers, period);
    let response = ga.run_report(&request).await?;
    Ok(normalize::aggregate_count(&response))
}

fn period_summary(current: f64, previous: f64) -> Value {
    json!({
        "users": normalize::json_number(current),
        "trend": trend::between(current, previous),
    })
}

async fn build_summary(state: &AppState) -> Result<Value, GaError> {
    let ga = &state.ga;

    // One request per visible widget, all in flight at once. Each pair of
    // current/previous counts feeds a trend badge.
    let timeseries_request = RunReportRequest::for_query(
        ReportType::Timeseries,
        Metric::ActiveUsers,
        Period::Current,
    );
    let (daily, daily_prev, weekly, weekly_prev, monthly, monthly_prev, timeseries) = tokio::join!(
        fetch_count(ga, ReportType::Daily, Period::Current),
        fetch_count(ga, ReportType::Daily, Period::Previous),
        fetch_count(ga, ReportType::Weekly, Period::Current),
        fetch_count(ga, ReportType::Weekly, Period::Previous),
        fetch_count(ga, ReportType::Monthly, Period::Current),
        fetch_count(ga, ReportType::Monthly, Period::Previous),
        ga.run_report(&timeseries_request),
    );

    let (daily, daily_prev) = (daily?, daily_prev?);
    let (weekly, weekly_prev) = (weekly?, weekly_prev?);
    let (monthly, monthly_prev) = (monthly?, monthly_prev?);
    let points = normalize::timeseries_points(&timeseries?);

    let user_activity: Vec<Value> = points
        .iter()
        .map(|p| json!({ "date": p.date, "value": p.active_users }))
        .collect();
    let avg_engagement: Vec<Value> = points
        .iter()
        .map(|p| {
            json!({
                "date": p.date,
                "value": p.average_engagement_time_per_user.round() as i64,
            })
        })
        .collect();

    Ok(json!({
        "daily": period_summary(daily, daily_prev),
        "weekly": period_summary(weekly, weekly_prev),
        "monthly": period_summary(monthly, monthly_prev),
        "userActivity": user_activity,
        "avgEngagement": avg_engagement,
    }))
}

/// `GET /api/dashboard` — everything the statistics page renders, in one
/// response. Any failing sub-request fails the whole document with the
/// first error's message plus a static remediation hint.
pub async fn summary(State(state): State<Arc<AppState>>) -> Response {
    match build_summary(&state).await {
        Ok(document) => Json(document).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string(), "hint": REMEDIATION_HINT })),
        )
            .into_response(),
    }
}

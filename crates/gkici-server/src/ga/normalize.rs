//! Normalization of upstream report rows into the stable shapes the charts
//! consume. Missing or malformed numeric values become 0; an empty result
//! set degrades to a zero count or an empty sequence, never an error.

use serde_json::Value;

use gkici_core::report::{MinutePoint, TimeseriesPoint};

use super::types::{ApiValue, ReportRow, RunReportResponse};

fn coerce(value: Option<&ApiValue>) -> f64 {
    value
        .and_then(|v| v.value.as_deref())
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn dimension(row: &ReportRow, index: usize, fallback: &str) -> String {
    row.dimension_values
        .get(index)
        .and_then(|v| v.value.clone())
        .unwrap_or_else(|| fallback.to_string())
}

/// Single count for the aggregate report types: first row, first metric.
pub fn aggregate_count(resp: &RunReportResponse) -> f64 {
    coerce(resp.rows.first().and_then(|row| row.metric_values.first()))
}

/// Per-day points, one per upstream row, both metrics per point.
pub fn timeseries_points(resp: &RunReportResponse) -> Vec<TimeseriesPoint> {
    resp.rows
        .iter()
        .map(|row| TimeseriesPoint {
            date: dimension(row, 0, "Unknown Date"),
            active_users: coerce(row.metric_values.first()) as i64,
            average_engagement_time_per_user: coerce(row.metric_values.get(1)),
        })
        .collect()
}

/// Minute buckets in the upstream order (newest first, pre-slicing).
pub fn minute_points(resp: &RunReportResponse) -> Vec<MinutePoint> {
    resp.rows
        .iter()
        .map(|row| MinutePoint {
            minute: dimension(row, 0, "Unknown"),
            active_users: coerce(row.metric_values.first()) as i64,
        })
        .collect()
}

/// Render a count as a JSON number, dropping the fraction when it is whole
/// so active-user counts stay integers on the wire.
pub fn json_number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(raw: &str) -> RunReportResponse {
        serde_json::from_str(raw).expect("response")
    }

    #[test]
    fn empty_result_degrades_to_zero_count() {
        assert_eq!(aggregate_count(&response("{}")), 0.0);
        assert_eq!(aggregate_count(&response(r#"{ "rows": [] }"#)), 0.0);
    }

    #[test]
    fn malformed_metric_values_coerce_to_zero() {
        let resp = response(
            r#"{ "rows": [
                { "metricValues": [ { "value": "abc" } ] }
            ] }"#,
        );
        assert_eq!(aggregate_count(&resp), 0.0);

        let resp = response(r#"{ "rows": [ { "metricValues": [ {} ] } ] }"#);
        assert_eq!(aggregate_count(&resp), 0.0);
    }

    #[test]
    fn aggregate_reads_first_row_first_metric() {
        let resp = response(
            r#"{ "rows": [
                { "metricValues": [ { "value": "42" }, { "value": "7" } ] },
                { "metricValues": [ { "value": "99" } ] }
            ] }"#,
        );
        assert_eq!(aggregate_count(&resp), 42.0);
    }

    #[test]
    fn timeseries_length_matches_upstream_rows() {
        let resp = response(
            r#"{ "rows": [
                { "dimensionValues": [ { "value": "20250601" } ],
                  "metricValues": [ { "value": "10" }, { "value": "33.5" } ] },
                { "dimensionValues": [ { "value": "20250602" } ],
                  "metricValues": [ { "value": "bad" } ] },
                { "metricValues": [] }
            ] }"#,
        );
        let points = timeseries_points(&resp);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, "20250601");
        assert_eq!(points[0].active_users, 10);
        assert_eq!(points[0].average_engagement_time_per_user, 33.5);
        // Malformed and absent values are numbers anyway.
        assert_eq!(points[1].active_users, 0);
        assert_eq!(points[1].average_engagement_time_per_user, 0.0);
        assert_eq!(points[2].date, "Unknown Date");
        assert_eq!(points[2].active_users, 0);
    }

    #[test]
    fn empty_timeseries_is_an_empty_sequence_not_zero_filled() {
        assert!(timeseries_points(&response("{}")).is_empty());
    }

    #[test]
    fn minute_points_keep_upstream_order() {
        let resp = response(
            r#"{ "rows": [
                { "dimensionValues": [ { "value": "202506291405" } ],
                  "metricValues": [ { "value": "3" } ] },
                { "dimensionValues": [ { "value": "202506291404" } ],
                  "metricValues": [ { "value": "1" } ] }
            ] }"#,
        );
        let points = minute_points(&resp);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].minute, "202506291405");
        assert_eq!(points[1].active_users, 1);
    }

    #[test]
    fn whole_counts_serialize_as_integers() {
        assert_eq!(json_number(0.0), serde_json::json!(0));
        assert_eq!(json_number(42.0), serde_json::json!(42));
        assert_eq!(json_number(33.5), serde_json::json!(33.5));
    }
}

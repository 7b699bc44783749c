//! Period-over-period trend figures for the dashboard badges.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    /// Absolute percentage change, formatted to one decimal place.
    pub percent: String,
    pub direction: Direction,
}

/// Compare a current-period value against its previous-period counterpart.
///
/// Returns `None` when the previous value is zero: with nothing to compare
/// against, no badge is shown.
pub fn between(current: f64, previous: f64) -> Option<Trend> {
    if previous == 0.0 {
        return None;
    }
    let percent = (current - previous).abs() / previous * 100.0;
    let direction = if current > previous {
        Direction::Up
    } else if current < previous {
        Direction::Down
    } else {
        Direction::Flat
    };
    Some(Trend {
        percent: format!("{percent:.1}"),
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_is_reported_upward() {
        let trend = between(120.0, 100.0).expect("trend");
        assert_eq!(trend.percent, "20.0");
        assert_eq!(trend.direction, Direction::Up);
    }

    #[test]
    fn decline_is_reported_downward() {
        let trend = between(100.0, 120.0).expect("trend");
        assert_eq!(trend.percent, "16.7");
        assert_eq!(trend.direction, Direction::Down);
    }

    #[test]
    fn equal_periods_are_flat() {
        let trend = between(75.0, 75.0).expect("trend");
        assert_eq!(trend.percent, "0.0");
        assert_eq!(trend.direction, Direction::Flat);
    }

    #[test]
    fn zero_previous_yields_no_trend() {
        assert_eq!(between(50.0, 0.0), None);
        assert_eq!(between(0.0, 0.0), None);
    }

    #[test]
    fn serializes_lowercase_direction() {
        let trend = between(120.0, 100.0).expect("trend");
        let json = serde_json::to_value(&trend).expect("json");
        assert_eq!(
            json,
            serde_json::json!({ "percent": "20.0", "direction": "up" })
        );
    }
}

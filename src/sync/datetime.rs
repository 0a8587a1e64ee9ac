//! Sales boundary decomposition into separate date and time-of-day fields.
//!
//! Months are calendar months (1-12) on both sides, so a boundary survives a
//! decompose/recompose cycle unchanged down to the minute. Seconds are shown
//! but dropped on recomposition.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Splits a boundary into `(date, time)` form values; `null` for both when absent.
pub fn decompose(boundary: Option<NaiveDateTime>) -> (Value, Value) {
    match boundary {
        Some(at) => (
            Value::String(at.format(DATE_FORMAT).to_string()),
            Value::String(at.format(TIME_FORMAT).to_string()),
        ),
        None => (Value::Null, Value::Null),
    }
}

/// Rebuilds a boundary from its date (`YYYY-MM-DD`) and time (`HH:MM[:SS]`)
/// fields. Unset or malformed input yields `None`.
pub fn recompose(date: &Value, time: &Value) -> Option<NaiveDateTime> {
    let (Value::String(date), Value::String(time)) = (date, time) else {
        return None;
    };

    let parsed = parse_parts(date, time);
    if parsed.is_none() {
        warn!("dropping malformed sales boundary: date={:?} time={:?}", date, time);
    }
    parsed
}

fn parse_parts(date: &str, time: &str) -> Option<NaiveDateTime> {
    let mut ymd = date.split('-');
    let year = ymd.next()?.trim().parse::<i32>().ok()?;
    let month = ymd.next()?.trim().parse::<u32>().ok()?;
    let day = ymd.next()?.trim().parse::<u32>().ok()?;
    if ymd.next().is_some() {
        return None;
    }

    let mut hm = time.split(':');
    let hour = hm.next()?.trim().parse::<u32>().ok()?;
    let minute = hm.next()?.trim().parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_decompose_formats_date_and_time() {
        let (date, time) = decompose(Some(at(2024, 3, 10, 14, 30)));
        assert_eq!(date, json!("2024-03-10"));
        assert_eq!(time, json!("14:30:00"));
    }

    #[test]
    fn test_round_trip_keeps_calendar_month() {
        let original = at(2024, 3, 10, 14, 30);
        let (date, time) = decompose(Some(original));
        assert_eq!(recompose(&date, &time), Some(original));
    }

    #[test]
    fn test_absent_boundary_round_trips_to_absent() {
        let (date, time) = decompose(None);
        assert_eq!(date, Value::Null);
        assert_eq!(time, Value::Null);
        assert_eq!(recompose(&date, &time), None);
    }

    #[test]
    fn test_either_half_unset_means_no_boundary() {
        assert_eq!(recompose(&json!("2024-03-10"), &Value::Null), None);
        assert_eq!(recompose(&Value::Null, &json!("14:30")), None);
    }

    #[test]
    fn test_seconds_are_ignored() {
        assert_eq!(
            recompose(&json!("2024-12-31"), &json!("23:59:58")),
            Some(at(2024, 12, 31, 23, 59))
        );
        assert_eq!(
            recompose(&json!("2024-12-31"), &json!("08:05")),
            Some(at(2024, 12, 31, 8, 5))
        );
    }

    #[test]
    fn test_malformed_components_mean_no_boundary() {
        assert_eq!(recompose(&json!("2024-03"), &json!("14:30")), None);
        assert_eq!(recompose(&json!("2024-13-01"), &json!("14:30")), None);
        assert_eq!(recompose(&json!("2024-03-10"), &json!("14")), None);
        assert_eq!(recompose(&json!("2024-03-10"), &json!("ab:cd")), None);
        assert_eq!(recompose(&json!(""), &json!("")), None);
        assert_eq!(recompose(&json!(20240310), &json!("14:30")), None);
    }
}

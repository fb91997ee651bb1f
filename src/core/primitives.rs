use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn datetime_to_epoch_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts epoch milliseconds back to a UTC timestamp, rounding to the millisecond.
#[must_use]
pub fn epoch_millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}

/// Parses an ISO-8601 timestamp into epoch milliseconds.
///
/// Offsets are honoured; strings without one are read as UTC.
pub fn parse_timestamp(text: &str) -> ChartResult<f64> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime_to_epoch_millis(parsed.with_timezone(&Utc)));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(datetime_to_epoch_millis(naive.and_utc()));
        }
    }

    Err(ChartError::InvalidTimestamp(format!(
        "`{trimmed}` is not an ISO-8601 timestamp"
    )))
}

#[cfg(test)]
mod tests {
    use super::{epoch_millis_to_datetime, parse_timestamp};

    #[test]
    fn parses_offset_and_naive_forms() {
        let with_zone = parse_timestamp("2024-03-01T12:00:00Z").expect("rfc3339");
        let with_offset = parse_timestamp("2024-03-01T14:00:00+02:00").expect("offset");
        let naive = parse_timestamp("2024-03-01T12:00:00.000").expect("naive");
        assert_eq!(with_zone, with_offset);
        assert_eq!(with_zone, naive);
        assert_eq!(with_zone, 1_709_294_400_000.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn millis_round_trip_through_datetime() {
        let dt = epoch_millis_to_datetime(1_709_294_400_123.0).expect("in range");
        assert_eq!(dt.timestamp_millis(), 1_709_294_400_123);
        assert!(epoch_millis_to_datetime(f64::NAN).is_none());
    }
}

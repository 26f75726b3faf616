//! Julian day <-> UTC conversion.
//!
//! Resolution is one millisecond; any instant with whole milliseconds survives
//! a round trip unchanged.

use crate::error::EngineError;
use chrono::{DateTime, Utc};

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert UTC datetime to Julian Day
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + dt.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Convert Julian Day to UTC datetime
pub fn julian_day_to_datetime(jd: f64) -> Result<DateTime<Utc>, EngineError> {
    if !jd.is_finite() {
        return Err(EngineError::DateOutOfRange(jd));
    }
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return Err(EngineError::DateOutOfRange(jd));
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64).ok_or(EngineError::DateOutOfRange(jd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_j2000_epoch() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((datetime_to_julian_day(j2000) - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let dt = Utc.with_ymd_and_hms(1987, 6, 21, 3, 45, 17).unwrap();
        let jd = datetime_to_julian_day(dt);
        assert_eq!(julian_day_to_datetime(jd).unwrap(), dt);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            julian_day_to_datetime(f64::NAN),
            Err(EngineError::DateOutOfRange(_))
        ));
    }
}

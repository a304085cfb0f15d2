//! Calendar-day bounds for report filters.
//! Every range is half-open, `[start of first day, start of day after last)`, in UTC.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

pub type Bounds = (DateTime<Utc>, DateTime<Utc>);

/// The whole of `date`.
pub fn day_bounds(date: NaiveDate) -> Bounds {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    (start, start + Duration::days(1))
}

/// Both dates inclusive. Supplying only one of them is an error.
pub fn optional_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Option<Bounds>, String> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            if end < start {
                return Err(format!("endDate {} is before startDate {}", end, start));
            }
            Ok(Some((day_bounds(start).0, day_bounds(end).1)))
        }
        _ => Err("startDate and endDate must be supplied together".to_string()),
    }
}

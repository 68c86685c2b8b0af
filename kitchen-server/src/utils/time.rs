//! Time helpers in the business timezone
//!
//! All date → instant conversion happens here; the data accessor only receives
//! UTC instants.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult, ErrorCode};

/// Parse a `YYYY-MM-DD` query value
///
/// The error names the offending parameter.
pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::invalid_field(
            ErrorCode::InvalidFormat,
            field,
            format!("Invalid {field}: '{value}' (expected YYYY-MM-DD)"),
        )
    })
}

/// Step used to walk forward out of a DST gap
const GAP_STEP_MINUTES: i64 = 15;
/// Upper bound on the walk (no zone skips more than a day)
const GAP_MAX_STEPS: usize = 24 * 60 / GAP_STEP_MINUTES as usize;

/// Local date + time → UTC instant
///
/// An ambiguous local time resolves to its first occurrence. A local time
/// inside a DST gap resolves to the first valid instant after the gap.
pub fn date_hms_to_utc(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> DateTime<Utc> {
    let naive = date
        .and_hms_opt(hour, min, sec)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN));

    let mut local = naive;
    for _ in 0..=GAP_MAX_STEPS {
        if let Some(dt) = local.and_local_timezone(tz).earliest() {
            return dt.with_timezone(&Utc);
        }
        // round up to the next step boundary so we land exactly on the gap end
        let into_step = i64::from(local.minute()) % GAP_STEP_MINUTES;
        local = local.with_second(0).unwrap_or(local)
            + Duration::minutes(GAP_STEP_MINUTES - into_step);
    }
    naive.and_utc()
}

/// Local midnight of `date`
pub fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    date_hms_to_utc(date, 0, 0, 0, tz)
}

/// Last instant of `date`: next local midnight minus one millisecond
///
/// Callers compare with `<= end`.
pub fn day_end(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start(next_day, tz) - Duration::milliseconds(1)
}

/// Calendar date of `now` in the business timezone
pub fn local_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Hour of day (0..=23) of `instant` in the business timezone
pub fn local_hour(instant: DateTime<Utc>, tz: Tz) -> u32 {
    instant.with_timezone(&tz).hour()
}

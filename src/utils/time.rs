use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns the current wall-clock instant in the configured timezone, without
/// offset information. Session times are stored and compared as naive local
/// instants.
pub fn now_local(tz: &Tz) -> NaiveDateTime {
    now_in_timezone(tz).naive_local()
}

/// Returns today's date in the configured timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

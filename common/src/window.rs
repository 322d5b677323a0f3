// Date window calculation
//
// "Tomorrow" is computed against the wall-clock date in a fixed zone:
// [midnight + 1 day, midnight + 2 days) relative to the current local date.

use crate::errors::WindowError;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// A half-open date window in the configured zone.
///
/// The lower bound is inclusive and the upper bound exclusive, matching the
/// `gte_`/`lt_` encoding the events API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Window {
    /// Inclusive lower bound in epoch seconds.
    pub fn start_epoch(&self) -> i64 {
        self.start.timestamp()
    }

    /// Exclusive upper bound in epoch seconds.
    pub fn end_epoch(&self) -> i64 {
        self.end.timestamp()
    }
}

/// Calculate tomorrow's window relative to `now` in the given zone.
pub fn tomorrow_window(now: DateTime<Utc>, tz: Tz) -> Result<Window, WindowError> {
    let today = now.with_timezone(&tz).date_naive();
    let start = local_midnight(today + Days::new(1), tz)?;
    let end = local_midnight(today + Days::new(2), tz)?;
    Ok(Window { start, end })
}

/// Resolve midnight on `date` to an instant in `tz`.
///
/// DST transitions can make a local time skipped or ambiguous; midnight never
/// is in America/New_York (shifts happen at 02:00), but the calculation stays
/// total for any configured zone by taking the earliest mapping and erroring
/// when none exists.
fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Tz>, WindowError> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| WindowError::UnrepresentableMidnight(midnight.to_string(), tz.to_string()))
}

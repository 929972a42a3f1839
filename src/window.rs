//! Visible date windows for calendar queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An inclusive date window, typically one calendar month of the visible view.
///
/// Membership is day-granular: an instant belongs to the window when its
/// calendar day falls between the window's first and last day, regardless of
/// time of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        DateWindow { start, end }
    }

    /// The window covering a whole calendar month: first day at 00:00:00
    /// through last day at 23:59:59 UTC. `None` for an invalid month number.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let last = next_first.pred_opt()?;

        Some(DateWindow {
            start: first.and_hms_opt(0, 0, 0)?.and_utc(),
            end: last.and_hms_opt(23, 59, 59)?.and_utc(),
        })
    }

    /// Day-granular inclusive membership test.
    pub fn contains_day(&self, instant: DateTime<Utc>) -> bool {
        let day = instant.date_naive();
        day >= self.start.date_naive() && day <= self.end.date_naive()
    }
}

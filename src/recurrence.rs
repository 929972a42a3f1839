//! Recurring event expansion.
//!
//! Expands a base event into the concrete instances falling inside a visible
//! window. Expansion is a pure function of the event and the window: no
//! hidden state, identical inputs always yield identical output. Instances
//! preserve the base event's time of day and its exact absolute duration.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};

use crate::event::{CalendarEvent, EventInstance, RecurrencePattern};
use crate::window::DateWindow;

/// Hard cap on instances emitted for a single base event.
pub const MAX_INSTANCES: usize = 365;

/// Horizon applied when a recurring event has no end date: occurrences are
/// generated up to this many months past the window's end.
const FALLBACK_HORIZON_MONTHS: u32 = 12;

/// Candidate occurrence start times for a recurring event, in ascending
/// order, ending after the last day (inclusive) that may hold an occurrence.
///
/// Each candidate is computed from the base start rather than from the
/// previous candidate, so a monthly rule anchored on day 31 clamps to the
/// last valid day of shorter months and recovers day 31 in longer ones
/// (Jan 31 -> Feb 28/29 -> Mar 31).
struct Occurrences {
    base_start: DateTime<Utc>,
    pattern: RecurrencePattern,
    until_day: NaiveDate,
    index: u32,
}

impl Occurrences {
    fn new(base_start: DateTime<Utc>, pattern: RecurrencePattern, until_day: NaiveDate) -> Self {
        Occurrences {
            base_start,
            pattern,
            until_day,
            index: 0,
        }
    }
}

impl Iterator for Occurrences {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<DateTime<Utc>> {
        let candidate = match self.pattern {
            RecurrencePattern::None => return None,
            RecurrencePattern::Daily => self
                .base_start
                .checked_add_signed(Duration::days(i64::from(self.index)))?,
            RecurrencePattern::Weekly => self
                .base_start
                .checked_add_signed(Duration::weeks(i64::from(self.index)))?,
            RecurrencePattern::Monthly => {
                self.base_start.checked_add_months(Months::new(self.index))?
            }
        };
        if candidate.date_naive() > self.until_day {
            return None;
        }
        self.index += 1;
        Some(candidate)
    }
}

/// Expand one base event into the instances falling inside `window`.
///
/// A non-recurring event expands to exactly one instance equal to itself,
/// with no window filtering at this layer (the caller already scopes the
/// base query by month). A recurring event yields every occurrence whose
/// calendar day lies inside the window, up to [`MAX_INSTANCES`], stopping at
/// the earlier of its end date (day-inclusive) and the window's end — once a
/// candidate passes the window no later one can fall inside it.
pub fn expand_event(event: &CalendarEvent, window: &DateWindow) -> Vec<EventInstance> {
    if !event.recurrence_pattern.is_recurring() {
        return vec![EventInstance::from_base(event)];
    }

    let until = event
        .recurrence_end_date
        .unwrap_or_else(|| fallback_horizon(window));
    let until_day = until.date_naive().min(window.end.date_naive());
    let duration = event.duration();

    Occurrences::new(event.start_time, event.recurrence_pattern, until_day)
        .filter(|start| window.contains_day(*start))
        .take(MAX_INSTANCES)
        .map(|start| EventInstance {
            title: event.title.clone(),
            description: event.description.clone(),
            start_time: start,
            end_time: start + duration,
            color: event.color.clone(),
            data: event.data.clone(),
            is_recurring_instance: true,
            original_event_id: event.id,
        })
        .collect()
}

/// Expand every base event and merge the results sorted by start time,
/// ready for the calendar view to render.
pub fn instances_for_window(events: &[CalendarEvent], window: &DateWindow) -> Vec<EventInstance> {
    let mut instances: Vec<EventInstance> = events
        .iter()
        .flat_map(|event| expand_event(event, window))
        .collect();
    instances.sort_by_key(|instance| instance.start_time);
    instances
}

fn fallback_horizon(window: &DateWindow) -> DateTime<Utc> {
    window
        .end
        .checked_add_months(Months::new(FALLBACK_HORIZON_MONTHS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

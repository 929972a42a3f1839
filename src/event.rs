//! Calendar event types.
//!
//! A `CalendarEvent` is the single stored row for an event, possibly carrying
//! a recurrence rule. An `EventInstance` is a concrete occurrence derived for
//! display inside a visible window; instances are recomputed on every query
//! and are never persisted as rows of their own.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BoardResult, non_empty};

/// How a base event repeats, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePattern {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl RecurrencePattern {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrencePattern::None)
    }
}

/// A stored calendar event (the base record that may define a recurrence rule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Start of the base occurrence.
    pub start_time: DateTime<Utc>,
    /// End of the base occurrence. Must not precede `start_time`.
    pub end_time: DateTime<Utc>,
    pub recurrence_pattern: RecurrencePattern,
    /// Last day (inclusive) on which occurrences may fall. When absent,
    /// expansion is bounded by a fallback horizon past the query window.
    pub recurrence_end_date: Option<DateTime<Utc>>,
    pub color: Option<String>,
    /// Opaque association data (e.g. which tab owns this event).
    /// Preserved verbatim on every generated instance.
    pub data: serde_json::Value,
}

impl CalendarEvent {
    pub fn validate(&self) -> BoardResult<()> {
        non_empty(&self.title, "event.title")?;
        if self.end_time < self.start_time {
            return Err(crate::error::BoardError::Validation(
                "event.end_time must not precede event.start_time".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute elapsed duration of the base occurrence.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// A concrete occurrence of a base event on a specific date.
///
/// Carries no identity of its own beyond `(original_event_id, start_time)`.
/// The delete-all-occurrences flow targets the base record through
/// `original_event_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInstance {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub color: Option<String>,
    pub data: serde_json::Value,
    /// True when derived from a recurring base event.
    pub is_recurring_instance: bool,
    /// Back-reference to the base event's id.
    pub original_event_id: Uuid,
}

impl EventInstance {
    /// The base event itself, viewed as its one and only instance.
    pub fn from_base(event: &CalendarEvent) -> Self {
        EventInstance {
            title: event.title.clone(),
            description: event.description.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            color: event.color.clone(),
            data: event.data.clone(),
            is_recurring_instance: false,
            original_event_id: event.id,
        }
    }
}

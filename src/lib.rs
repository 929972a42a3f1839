//! Domain core for the deskboard personal dashboard.
//!
//! This crate provides the types and algorithms the dashboard shell consumes:
//! - `event` / `window` / `recurrence`: calendar events and the expansion of
//!   recurring events into the instances visible in a month window
//! - `timer` / `timer_store`: wall-clock countdown timers, one per widget
//! - `notification`: the capped notification feed behind the bell
//! - `widget`: the widget, tab, and content rows the shell persists
//!
//! Persistence, authentication, and rendering are delegated to the shell and
//! its hosted backend; everything here is pure, synchronous computation over
//! the values passed in.

pub mod error;
pub mod event;
pub mod notification;
pub mod recurrence;
pub mod timer;
pub mod timer_store;
pub mod widget;
pub mod window;

// Re-export the main types at crate root for convenience
pub use error::{BoardError, BoardResult};
pub use event::{CalendarEvent, EventInstance, RecurrencePattern};
pub use notification::{Notification, NotificationFeed, NotificationKind, NotificationPrefs};
pub use recurrence::{MAX_INSTANCES, expand_event, instances_for_window};
pub use timer::{TimerMode, TimerState};
pub use timer_store::{ActiveTimer, SoundSettings, TimerCompletion, TimerStore};
pub use widget::{GridPosition, Note, QuickLink, Tab, TodoItem, Widget, WidgetKind};
pub use window::DateWindow;

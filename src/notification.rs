//! In-app notification feed.
//!
//! A capped, newest-first list shown behind the top-bar bell, with per-kind
//! enable flags. Builders cover the two event sources this core knows about:
//! calendar instances coming up within the next two days, and completed
//! timers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::EventInstance;
use crate::timer_store::TimerCompletion;
use crate::widget::TodoItem;

/// Feed length cap; older entries fall off the end.
pub const MAX_FEED_LEN: usize = 50;

/// How many days ahead the daily calendar scan looks (today, tomorrow, and
/// two days out).
const UPCOMING_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Calendar,
    Timer,
    Task,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    /// Opaque payload for the shell (event id, timer mode, ...).
    pub data: serde_json::Value,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        data: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Notification {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: now,
            data,
        }
    }
}

/// Per-kind enable flags, all on by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub calendar: bool,
    pub timer: bool,
    pub tasks: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        NotificationPrefs {
            calendar: true,
            timer: true,
            tasks: true,
        }
    }
}

impl NotificationPrefs {
    pub fn enabled(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Calendar => self.calendar,
            NotificationKind::Timer => self.timer,
            NotificationKind::Task => self.tasks,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NotificationFeed {
    notifications: Vec<Notification>,
    unread: usize,
    pub prefs: NotificationPrefs,
    /// UTC day of the last upcoming-events scan.
    last_event_scan: Option<chrono::NaiveDate>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        NotificationFeed::default()
    }

    /// Insert at the front, dropping the oldest entries past the cap.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
        self.unread += 1;
        while self.notifications.len() > MAX_FEED_LEN {
            if let Some(dropped) = self.notifications.pop() {
                if !dropped.read {
                    self.unread = self.unread.saturating_sub(1);
                }
            }
        }
    }

    pub fn mark_read(&mut self, id: Uuid) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            if !notification.read {
                notification.read = true;
                self.unread = self.unread.saturating_sub(1);
            }
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
        self.unread = 0;
    }

    pub fn remove(&mut self, id: Uuid) {
        if let Some(idx) = self.notifications.iter().position(|n| n.id == id) {
            let removed = self.notifications.remove(idx);
            if !removed.read {
                self.unread = self.unread.saturating_sub(1);
            }
        }
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
        self.unread = 0;
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Notify about an instance `days_until` days away. Returns whether a
    /// notification was pushed (calendar notifications may be disabled).
    pub fn notify_event_upcoming(
        &mut self,
        instance: &EventInstance,
        days_until: i64,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.prefs.enabled(NotificationKind::Calendar) {
            return false;
        }
        let message = match days_until {
            0 => "Event today".to_string(),
            1 => "Event tomorrow".to_string(),
            n => format!("Event in {n} days"),
        };
        let data = serde_json::json!({
            "event_id": instance.original_event_id,
            "date": instance.start_time,
            "days_until": days_until,
        });
        self.push(Notification::new(
            NotificationKind::Calendar,
            instance.title.clone(),
            message,
            data,
            now,
        ));
        true
    }

    pub fn notify_timer_complete(
        &mut self,
        completion: &TimerCompletion,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.prefs.enabled(NotificationKind::Timer) {
            return false;
        }
        let data = serde_json::json!({
            "widget_id": completion.widget_id,
            "mode": completion.mode,
            "minutes": completion.minutes,
        });
        self.push(Notification::new(
            NotificationKind::Timer,
            format!("{} complete", completion.name),
            format!("{} minutes", completion.minutes),
            data,
            now,
        ));
        true
    }

    pub fn notify_task_reminder(&mut self, item: &TodoItem, now: DateTime<Utc>) -> bool {
        if !self.prefs.enabled(NotificationKind::Task) {
            return false;
        }
        let data = serde_json::json!({ "task_id": item.id });
        self.push(Notification::new(
            NotificationKind::Task,
            item.text.clone(),
            "Task reminder".to_string(),
            data,
            now,
        ));
        true
    }

    /// Daily scan over the expanded instances: pushes one notification per
    /// instance falling within the next [`UPCOMING_DAYS`] days. The scan is
    /// latched per UTC day, but only once something was actually notified, so
    /// events added later the same day still get their turn. Returns the
    /// number of notifications pushed.
    pub fn scan_upcoming(&mut self, instances: &[EventInstance], now: DateTime<Utc>) -> usize {
        let today = now.date_naive();
        if self.last_event_scan == Some(today) {
            return 0;
        }

        let mut pushed = 0;
        for instance in instances {
            let days_until = (instance.start_time.date_naive() - today).num_days();
            if (0..=UPCOMING_DAYS).contains(&days_until)
                && self.notify_event_upcoming(instance, days_until, now)
            {
                pushed += 1;
            }
        }
        if pushed > 0 {
            self.last_event_scan = Some(today);
        }
        pushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CalendarEvent, EventInstance, RecurrencePattern};
    use crate::timer::TimerMode;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn make_instance(start: DateTime<Utc>) -> EventInstance {
        let event = CalendarEvent {
            id: Uuid::new_v4(),
            title: "Dentist".to_string(),
            description: None,
            start_time: start,
            end_time: start + Duration::hours(1),
            recurrence_pattern: RecurrencePattern::None,
            recurrence_end_date: None,
            color: None,
            data: serde_json::Value::Null,
        };
        EventInstance::from_base(&event)
    }

    fn make_completion() -> TimerCompletion {
        TimerCompletion {
            widget_id: Uuid::new_v4(),
            mode: TimerMode::Pomodoro,
            minutes: 25,
            name: "Pomodoro".to_string(),
        }
    }

    #[test]
    fn push_caps_the_feed_and_keeps_unread_consistent() {
        let mut feed = NotificationFeed::new();
        for i in 0..60 {
            feed.push(Notification::new(
                NotificationKind::Task,
                format!("n{i}"),
                "msg",
                serde_json::Value::Null,
                now(),
            ));
        }

        assert_eq!(feed.len(), MAX_FEED_LEN);
        assert_eq!(feed.unread_count(), MAX_FEED_LEN);
        // Newest first: the last push is at the front.
        assert_eq!(feed.iter().next().unwrap().title, "n59");
    }

    #[test]
    fn read_bookkeeping_through_mark_and_remove() {
        let mut feed = NotificationFeed::new();
        let completion = make_completion();
        feed.notify_timer_complete(&completion, now());
        feed.notify_timer_complete(&completion, now());
        assert_eq!(feed.unread_count(), 2);

        let first_id = feed.iter().next().unwrap().id;
        feed.mark_read(first_id);
        assert_eq!(feed.unread_count(), 1);
        // Marking twice does not double-count.
        feed.mark_read(first_id);
        assert_eq!(feed.unread_count(), 1);

        feed.remove(first_id);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.unread_count(), 1);

        feed.mark_all_read();
        assert_eq!(feed.unread_count(), 0);

        feed.clear();
        assert!(feed.is_empty());
    }

    #[test]
    fn disabled_kinds_are_not_pushed() {
        let mut feed = NotificationFeed::new();
        feed.prefs.timer = false;

        assert!(!feed.notify_timer_complete(&make_completion(), now()));
        assert!(feed.is_empty());

        // Other kinds still go through.
        assert!(feed.notify_event_upcoming(&make_instance(now()), 0, now()));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn upcoming_messages_name_the_day() {
        let mut feed = NotificationFeed::new();
        let instance = make_instance(now());

        feed.notify_event_upcoming(&instance, 0, now());
        feed.notify_event_upcoming(&instance, 1, now());
        feed.notify_event_upcoming(&instance, 4, now());

        let messages: Vec<&str> = feed.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["Event in 4 days", "Event tomorrow", "Event today"]);
    }

    #[test]
    fn timer_notification_uses_display_name_and_minutes() {
        let mut feed = NotificationFeed::new();
        let mut completion = make_completion();
        completion.name = "Tea".to_string();
        completion.minutes = 3;

        feed.notify_timer_complete(&completion, now());
        let notification = feed.iter().next().unwrap();
        assert_eq!(notification.title, "Tea complete");
        assert_eq!(notification.message, "3 minutes");
    }

    #[test]
    fn scan_runs_at_most_once_per_day() {
        let mut feed = NotificationFeed::new();
        let instances = vec![
            make_instance(now()),                       // today
            make_instance(now() + Duration::days(1)),   // tomorrow
            make_instance(now() + Duration::days(2)),   // two days out
            make_instance(now() + Duration::days(3)),   // too far out
            make_instance(now() - Duration::days(1)),   // already past
        ];

        assert_eq!(feed.scan_upcoming(&instances, now()), 3);
        // Same day: latched.
        assert_eq!(feed.scan_upcoming(&instances, now() + Duration::hours(5)), 0);
        // Next day the scan runs again; the three-days-out instance has
        // slid into the horizon and yesterday's has dropped out.
        let tomorrow = now() + Duration::days(1);
        assert_eq!(feed.scan_upcoming(&instances, tomorrow), 3);
    }

    #[test]
    fn empty_scan_does_not_latch_the_day() {
        let mut feed = NotificationFeed::new();
        let far_out = vec![make_instance(now() + Duration::days(10))];
        assert_eq!(feed.scan_upcoming(&far_out, now()), 0);

        // An event created later the same day still gets notified.
        let today = vec![make_instance(now() + Duration::hours(3))];
        assert_eq!(feed.scan_upcoming(&today, now() + Duration::hours(1)), 1);
        // And now the day is latched.
        assert_eq!(feed.scan_upcoming(&today, now() + Duration::hours(2)), 0);
    }
}

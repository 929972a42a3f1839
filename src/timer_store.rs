//! Per-widget timer registry.
//!
//! The dashboard can host any number of timer widgets; each owns one
//! [`TimerState`] keyed by its widget id. Ids without stored state read as
//! the default timer, and mutation inserts on demand. The shell persists the
//! whole store through the hosted backend and polls [`TimerStore::poll_complete`]
//! on its display tick.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::timer::{TimerMode, TimerState};

/// Completion chime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub tone: String,
    pub volume: f32,
    pub repeat: u32,
}

impl Default for SoundSettings {
    fn default() -> Self {
        SoundSettings {
            tone: "tone1".to_string(),
            volume: 0.7,
            repeat: 3,
        }
    }
}

/// A running timer as surfaced in the top-bar badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTimer {
    pub widget_id: Uuid,
    pub mode: TimerMode,
    pub remaining_secs: u32,
    pub name: String,
}

/// A one-time completion observation, consumed by the notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerCompletion {
    pub widget_id: Uuid,
    pub mode: TimerMode,
    /// Whole minutes of the mode's configured duration, independent of any
    /// pause/resume history.
    pub minutes: u32,
    pub name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TimerStore {
    timers: HashMap<Uuid, TimerState>,
    pub sound: SoundSettings,
}

impl TimerStore {
    pub fn new() -> Self {
        TimerStore::default()
    }

    /// The timer for a widget, defaulting for ids never touched.
    pub fn get(&self, widget_id: Uuid) -> TimerState {
        self.timers.get(&widget_id).cloned().unwrap_or_default()
    }

    fn timer_mut(&mut self, widget_id: Uuid) -> &mut TimerState {
        self.timers.entry(widget_id).or_default()
    }

    pub fn remaining(&self, widget_id: Uuid, now: DateTime<Utc>) -> u32 {
        self.get(widget_id).remaining(now)
    }

    pub fn start(&mut self, widget_id: Uuid, now: DateTime<Utc>) {
        debug!(%widget_id, "timer started");
        self.timer_mut(widget_id).start(now);
    }

    pub fn pause(&mut self, widget_id: Uuid, now: DateTime<Utc>) {
        debug!(%widget_id, "timer paused");
        self.timer_mut(widget_id).pause(now);
    }

    pub fn reset(&mut self, widget_id: Uuid) {
        debug!(%widget_id, "timer reset");
        self.timer_mut(widget_id).reset();
    }

    pub fn set_mode(&mut self, widget_id: Uuid, mode: TimerMode) {
        debug!(%widget_id, ?mode, "timer mode changed");
        self.timer_mut(widget_id).set_mode(mode);
    }

    pub fn set_custom_minutes(&mut self, widget_id: Uuid, minutes: u32) {
        debug!(%widget_id, minutes, "custom duration set");
        self.timer_mut(widget_id).set_custom_minutes(minutes);
    }

    pub fn set_name(&mut self, widget_id: Uuid, name: impl Into<String>) {
        self.timer_mut(widget_id).name = name.into();
    }

    /// Drop the state for a deleted widget.
    pub fn remove(&mut self, widget_id: Uuid) {
        if self.timers.remove(&widget_id).is_some() {
            debug!(%widget_id, "timer removed");
        }
    }

    /// All running timers with their remaining seconds at `now`.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<ActiveTimer> {
        self.timers
            .iter()
            .filter(|(_, timer)| timer.is_running)
            .map(|(widget_id, timer)| ActiveTimer {
                widget_id: *widget_id,
                mode: timer.mode,
                remaining_secs: timer.remaining(now),
                name: timer.display_name().to_string(),
            })
            .collect()
    }

    pub fn active_count(&self, now: DateTime<Utc>) -> usize {
        self.active(now).len()
    }

    /// Fire the completion side effect at most once.
    ///
    /// Returns `Some` exactly when a running timer has reached zero;
    /// completing stops the timer, so repeated polling cannot re-fire.
    pub fn poll_complete(&mut self, widget_id: Uuid, now: DateTime<Utc>) -> Option<TimerCompletion> {
        let timer = self.timers.get_mut(&widget_id)?;
        if !timer.is_running || timer.remaining(now) > 0 {
            return None;
        }

        let completion = TimerCompletion {
            widget_id,
            mode: timer.mode,
            minutes: timer.mode.duration_secs(timer.custom_minutes) / 60,
            name: timer.display_name().to_string(),
        };
        timer.complete();
        info!(%widget_id, minutes = completion.minutes, "timer completed");
        Some(completion)
    }
}

//! Countdown timer state.
//!
//! Remaining time is computed on demand from the wall-clock delta against the
//! start instant, never by decrementing a counter on a tick. A missed poll
//! (backgrounded tab, system sleep) therefore never skews the result: the
//! answer is exact whenever it is asked for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Timer presets, each mapping to a canonical duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Pomodoro,
    Short,
    Long,
    Custom,
}

impl TimerMode {
    /// Canonical duration in seconds for this mode.
    pub fn duration_secs(&self, custom_minutes: u32) -> u32 {
        match self {
            TimerMode::Pomodoro => 25 * 60,
            TimerMode::Short => 5 * 60,
            TimerMode::Long => 15 * 60,
            TimerMode::Custom => custom_minutes.saturating_mul(60),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Pomodoro",
            TimerMode::Short => "Short Break",
            TimerMode::Long => "Long Break",
            TimerMode::Custom => "Timer",
        }
    }
}

/// State of one countdown timer.
///
/// Exactly one side is authoritative at any instant: while running,
/// `started_at` plus `initial_secs`; while stopped, `paused_secs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: TimerMode,
    /// User-defined minutes backing [`TimerMode::Custom`].
    pub custom_minutes: u32,
    pub is_running: bool,
    /// Instant of the most recent start. `None` while stopped.
    pub started_at: Option<DateTime<Utc>>,
    /// Full duration in effect at the most recent start.
    pub initial_secs: u32,
    /// Seconds remaining, valid only while stopped.
    pub paused_secs: u32,
    /// Optional user label, independent of mode.
    pub name: String,
}

impl Default for TimerState {
    /// A stopped 25-minute pomodoro.
    fn default() -> Self {
        let secs = TimerMode::Pomodoro.duration_secs(25);
        TimerState {
            mode: TimerMode::Pomodoro,
            custom_minutes: 25,
            is_running: false,
            started_at: None,
            initial_secs: secs,
            paused_secs: secs,
            name: String::new(),
        }
    }
}

impl TimerState {
    /// Seconds remaining at `now`.
    ///
    /// Running timers report `initial_secs` minus the whole seconds elapsed
    /// since the start instant, clamped to zero. A start instant in the
    /// future (clock adjustment) counts as zero elapsed.
    pub fn remaining(&self, now: DateTime<Utc>) -> u32 {
        if !self.is_running {
            return self.paused_secs;
        }
        let Some(started) = self.started_at else {
            return self.initial_secs;
        };
        let elapsed = (now - started).num_seconds().max(0);
        self.initial_secs
            .saturating_sub(u32::try_from(elapsed).unwrap_or(u32::MAX))
    }

    /// Start or resume. The duration in effect becomes whatever was
    /// remaining at the last pause, not the mode's full duration.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.initial_secs = self.paused_secs;
        self.started_at = Some(now);
        self.is_running = true;
    }

    /// Pause, freezing the remaining time as of `now`.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        self.paused_secs = self.remaining(now);
        self.is_running = false;
        self.started_at = None;
    }

    /// Stop and restore the full canonical duration for the current mode.
    pub fn reset(&mut self) {
        let secs = self.mode.duration_secs(self.custom_minutes);
        self.is_running = false;
        self.started_at = None;
        self.initial_secs = secs;
        self.paused_secs = secs;
    }

    /// Switch mode; equivalent to a reset under the new mode's duration.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.reset();
    }

    /// Set the custom duration, switching to custom mode and resetting.
    pub fn set_custom_minutes(&mut self, minutes: u32) {
        self.custom_minutes = minutes;
        self.set_mode(TimerMode::Custom);
    }

    /// Terminal observation: the caller detected zero remaining while
    /// running. Stops the timer with nothing left on the clock.
    pub fn complete(&mut self) {
        self.is_running = false;
        self.started_at = None;
        self.paused_secs = 0;
    }

    /// The user label, falling back to the mode's canonical label.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.mode.label()
        } else {
            &self.name
        }
    }

    pub fn validate(&self) -> BoardResult<()> {
        if self.is_running && self.started_at.is_none() {
            return Err(BoardError::Validation(
                "timer.started_at must be set while running".to_string(),
            ));
        }
        if !self.is_running && self.started_at.is_some() {
            return Err(BoardError::Validation(
                "timer.started_at must be cleared while stopped".to_string(),
            ));
        }
        Ok(())
    }
}

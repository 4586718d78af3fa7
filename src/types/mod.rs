//! Core data types for the pomodoro tray timer.
//!
//! This module defines the data structures used for:
//! - Phase and pause state of the countdown
//! - Timer configuration with per-field validation
//! - Unvalidated settings input coming from the presentation shell

use serde::{Deserialize, Serialize};

// ============================================================================
// Phase
// ============================================================================

/// One of the two timer modes, each with its own configured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focused work interval
    Working,
    /// Rest interval between work intervals
    Resting,
}

impl Phase {
    /// Returns the lowercase identifier of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Working => "working",
            Phase::Resting => "resting",
        }
    }

    /// Returns the label used in the status string.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Working => "Working",
            Phase::Resting => "Resting",
        }
    }

    /// Returns the phase that follows this one.
    pub fn opposite(&self) -> Phase {
        match self {
            Phase::Working => Phase::Resting,
            Phase::Resting => Phase::Working,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Working
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Default work duration in minutes.
pub const DEFAULT_WORK_MINUTES: u32 = 25;

/// Default rest duration in minutes.
pub const DEFAULT_REST_MINUTES: u32 = 5;

/// Persisted timer configuration.
///
/// Both durations are always greater than zero. Values only enter through
/// [`TimerConfig::apply`], which drops non-positive input field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work duration in minutes
    pub work_minutes: u32,
    /// Rest duration in minutes
    pub rest_minutes: u32,
    /// Whether the app is registered to launch at login
    pub auto_start_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            rest_minutes: DEFAULT_REST_MINUTES,
            auto_start_enabled: false,
        }
    }
}

impl TimerConfig {
    /// Returns the duration of the given phase in minutes.
    pub fn minutes_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Working => self.work_minutes,
            Phase::Resting => self.rest_minutes,
        }
    }

    /// Returns the duration of the given phase in seconds.
    pub fn seconds_for(&self, phase: Phase) -> u32 {
        self.minutes_for(phase).saturating_mul(60)
    }

    /// Applies user input, keeping the current value for any duration that
    /// is not a positive integer. The autostart flag is always taken.
    ///
    /// Returns the list of rejected fields.
    pub fn apply(&mut self, draft: &SettingsDraft) -> Vec<RejectedField> {
        let mut rejected = Vec::new();

        match positive_minutes(draft.work_minutes) {
            Some(minutes) => self.work_minutes = minutes,
            None => rejected.push(RejectedField::WorkMinutes(draft.work_minutes)),
        }
        match positive_minutes(draft.rest_minutes) {
            Some(minutes) => self.rest_minutes = minutes,
            None => rejected.push(RejectedField::RestMinutes(draft.rest_minutes)),
        }
        self.auto_start_enabled = draft.auto_start_enabled;

        rejected
    }
}

/// Converts a raw duration into a valid minute count.
pub(crate) fn positive_minutes(value: i64) -> Option<u32> {
    if value > 0 {
        u32::try_from(value).ok()
    } else {
        None
    }
}

/// A settings field whose input was dropped during [`TimerConfig::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedField {
    /// Work duration was not a positive integer
    WorkMinutes(i64),
    /// Rest duration was not a positive integer
    RestMinutes(i64),
}

// ============================================================================
// SettingsDraft
// ============================================================================

/// Unvalidated settings as entered in the settings surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDraft {
    /// Requested work duration in minutes
    pub work_minutes: i64,
    /// Requested rest duration in minutes
    pub rest_minutes: i64,
    /// Requested autostart flag
    pub auto_start_enabled: bool,
}

impl SettingsDraft {
    /// Creates a draft from raw values.
    pub fn new(work_minutes: i64, rest_minutes: i64, auto_start_enabled: bool) -> Self {
        Self {
            work_minutes,
            rest_minutes,
            auto_start_enabled,
        }
    }
}

impl From<TimerConfig> for SettingsDraft {
    fn from(config: TimerConfig) -> Self {
        Self {
            work_minutes: i64::from(config.work_minutes),
            rest_minutes: i64::from(config.rest_minutes),
            auto_start_enabled: config.auto_start_enabled,
        }
    }
}

// ============================================================================
// PhaseState
// ============================================================================

/// Whether a phase-complete transition is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStatus {
    /// No transition in progress
    #[default]
    Idle,
    /// Between exhaustion of one phase and the start of the next
    TransitioningPhase,
}

/// In-memory countdown state owned by the phase controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseState {
    /// Current phase
    pub phase: Phase,
    /// Whether the countdown is paused
    pub paused: bool,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Transition guard
    pub transition: TransitionStatus,
}

impl PhaseState {
    /// Creates a fresh running Working phase for the given configuration.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            phase: Phase::Working,
            paused: false,
            remaining_seconds: config.seconds_for(Phase::Working),
            transition: TransitionStatus::Idle,
        }
    }

    /// Returns true while a phase-complete transition is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.transition == TransitionStatus::TransitioningPhase
    }
}

// ============================================================================
// Tests
// ============================================================================

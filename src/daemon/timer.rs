//! Phase controller for the pomodoro tray timer.
//!
//! This module provides the work/rest state machine:
//! - Phase transitions (Working ⇄ Resting) on countdown exhaustion
//! - Pause/resume without catching up missed seconds
//! - The live status string pushed to the notification sink
//! - A transition guard so one exhaustion produces exactly one advance

use crate::notification::{NotificationSink, NotificationType};
use crate::types::{Phase, PhaseState, TimerConfig, TransitionStatus};

use super::schedule::TickSchedule;

/// Status string shown while the countdown is paused.
pub const PAUSED_STATUS: &str = "Paused";

// ============================================================================
// TickOutcome
// ============================================================================

/// What a single call to [`PhaseController::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused, disarmed, or a transition was already in progress.
    Ignored,
    /// One second was taken off the countdown.
    Counted {
        /// Seconds left after this tick
        remaining_seconds: u32,
    },
    /// The countdown ran out and the next phase started.
    PhaseCompleted {
        /// Phase that ran out
        ended: Phase,
        /// Phase that started
        started: Phase,
    },
}

// ============================================================================
// PhaseController
// ============================================================================

/// Owns the countdown state and its tick schedule.
pub struct PhaseController<N: NotificationSink> {
    config: TimerConfig,
    state: PhaseState,
    schedule: TickSchedule,
    sink: N,
}

impl<N: NotificationSink> PhaseController<N> {
    /// Creates a controller in a running Working phase and arms the tick.
    pub fn new(config: TimerConfig, sink: N) -> Self {
        let mut controller = Self {
            state: PhaseState::new(&config),
            config,
            schedule: TickSchedule::new(),
            sink,
        };
        controller.start_phase(Phase::Working);
        controller
    }

    /// Starts `phase` with a full countdown.
    ///
    /// The tick schedule is always cancelled first and only re-armed when
    /// the controller is not paused.
    pub fn start_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.state.remaining_seconds = self.config.seconds_for(phase);

        self.schedule.cancel();
        if !self.state.paused {
            self.schedule.arm();
        }

        tracing::debug!(
            phase = phase.as_str(),
            remaining_seconds = self.state.remaining_seconds,
            paused = self.state.paused,
            "phase started"
        );
        self.publish_status();
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.is_transitioning() {
            tracing::debug!("tick ignored during phase transition");
            return TickOutcome::Ignored;
        }
        if self.state.paused || !self.schedule.is_armed() {
            return TickOutcome::Ignored;
        }

        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            self.publish_status();
            if self.state.remaining_seconds > 0 {
                return TickOutcome::Counted {
                    remaining_seconds: self.state.remaining_seconds,
                };
            }
        }

        self.complete_phase()
    }

    /// Ends the current phase: notify, then start the opposite one.
    fn complete_phase(&mut self) -> TickOutcome {
        self.state.transition = TransitionStatus::TransitioningPhase;
        self.schedule.cancel();

        let ended = self.state.phase;
        let notice = NotificationType::for_ended(ended);
        tracing::info!(phase = ended.as_str(), "phase complete");
        self.sink.notify(notice.title(), notice.body());

        let started = ended.opposite();
        self.start_phase(started);

        self.state.transition = TransitionStatus::Idle;
        TickOutcome::PhaseCompleted { ended, started }
    }

    /// Flips between paused and running. Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.paused = !self.state.paused;

        if self.state.paused {
            self.schedule.cancel();
            tracing::info!(
                remaining_seconds = self.state.remaining_seconds,
                "timer paused"
            );
        } else {
            self.schedule.arm();
            tracing::info!(
                remaining_seconds = self.state.remaining_seconds,
                "timer resumed"
            );
        }
        self.publish_status();

        self.state.paused
    }

    /// Adopts new durations and restarts from a fresh Working phase.
    ///
    /// The pause flag is left as it was.
    pub fn reconfigure(&mut self, config: TimerConfig) {
        self.config = config;
        self.start_phase(Phase::Working);
    }

    /// Returns the live status string.
    pub fn status_text(&self) -> String {
        if self.state.paused {
            PAUSED_STATUS.to_string()
        } else {
            format_status(self.state.phase, self.state.remaining_seconds)
        }
    }

    fn publish_status(&self) {
        self.sink.set_status(&self.status_text());
    }

    /// Returns the current countdown state.
    pub fn state(&self) -> &PhaseState {
        &self.state
    }

    /// Returns the durations in use.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns the tick schedule.
    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Returns the notification sink.
    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Returns a mutable reference to the state (for testing).
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut PhaseState {
        &mut self.state
    }
}

impl<N: NotificationSink> std::fmt::Debug for PhaseController<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}

/// Formats `"<Working|Resting> (M:SS)"`.
pub fn format_status(phase: Phase, remaining_seconds: u32) -> String {
    format!(
        "{} ({}:{:02})",
        phase.label(),
        remaining_seconds / 60,
        remaining_seconds % 60
    )
}

// ============================================================================
// Tests
// ============================================================================

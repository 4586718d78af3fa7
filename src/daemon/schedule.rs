//! Cancellable one-second tick schedule.
//!
//! The schedule itself never sleeps. It records whether ticks are wanted
//! and bumps a generation counter on every re-arm; the event loop in
//! [`super::runtime`] watches the generation and restarts its interval so
//! that each re-arm begins a fresh one-second period.

use std::time::Duration;

/// Period between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Recurring tick trigger owned by the phase controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSchedule {
    armed: bool,
    generation: u64,
}

impl TickSchedule {
    /// Creates a disarmed schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops ticks. Calling this on a disarmed schedule is a no-op.
    pub fn cancel(&mut self) {
        if self.armed {
            tracing::trace!(generation = self.generation, "tick schedule cancelled");
        }
        self.armed = false;
    }

    /// Starts a fresh one-second tick source, replacing any existing one.
    pub fn arm(&mut self) {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        tracing::trace!(generation = self.generation, "tick schedule armed");
    }

    /// Returns true while ticks should be delivered.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns the arm counter. Changes every time [`arm`](Self::arm) runs.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

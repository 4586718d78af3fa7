//! Timer runtime for the Pomodoro Timer.
//!
//! This module contains the core functionality:
//! - `timer`: Phase controller with the countdown and phase transitions
//! - `schedule`: Armed/disarmed state of the one-second tick
//! - `app`: Application object dispatching shell commands
//! - `runtime`: Single-threaded event loop driving ticks and commands
//! - `console`: Terminal presentation shell

pub mod app;
pub mod console;
pub mod runtime;
pub mod schedule;
pub mod timer;

pub use app::{App, SettingsView, ShellCommand, ShellResponse};
pub use runtime::EventLoop;
pub use schedule::{TickSchedule, TICK_INTERVAL};
pub use timer::{format_status, PhaseController, TickOutcome, PAUSED_STATUS};

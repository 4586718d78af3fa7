//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer - work/rest countdown living in the tray
#[derive(Parser, Debug)]
#[command(
    name = "pomotray",
    version,
    about = "Pomodoro work/rest timer with a tray icon",
    long_about = "Alternates between a work phase and a rest phase, shows the \
                  countdown in the tray (or the terminal) and notifies you when \
                  a phase ends.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "POMOTRAY_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer
    Run(RunArgs),

    /// Inspect or change the stored settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Log phase notifications instead of showing desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Do not create a tray icon
    #[arg(long)]
    pub no_tray: bool,
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Print the stored settings
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change stored settings (non-positive durations are ignored)
    Set(SetArgs),

    /// Print the settings file location
    Path,
}

/// Arguments for `settings set`; omitted values keep their stored value
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SetArgs {
    /// Work phase length in minutes
    #[arg(short, long, allow_negative_numbers = true)]
    pub work: Option<i64>,

    /// Rest phase length in minutes
    #[arg(short, long, allow_negative_numbers = true)]
    pub rest: Option<i64>,

    /// Start at login (true/false)
    #[arg(short, long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub autostart: Option<bool>,
}

impl SetArgs {
    /// Returns true when no value was given.
    pub fn is_empty(&self) -> bool {
        self.work.is_none() && self.rest.is_none() && self.autostart.is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================

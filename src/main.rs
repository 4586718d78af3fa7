//! Pomodoro Timer - alternating work and rest countdowns
//!
//! Runs a 25 minute work phase followed by a 5 minute rest phase (both
//! configurable), forever, with the countdown shown in the tray or the
//! terminal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use pomotray::autostart;
use pomotray::cli::{Cli, Commands, Display, RunArgs, SetArgs, SettingsCommand};
use pomotray::daemon::console::{self, ConsoleSink, CONSOLE_HELP};
use pomotray::daemon::{App, EventLoop, SettingsView, ShellResponse};
use pomotray::menubar::{TrayIconManager, TraySink};
use pomotray::notification::{DesktopNotifier, LogNotifier, SinkSet};
use pomotray::settings::{default_settings_path, SettingsStore};
use pomotray::types::SettingsDraft;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects debug output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    tracing::debug!(path = %settings_path.display(), "settings file");

    match cli.command {
        Some(Commands::Run(args)) => run_timer(settings_path, args).await?,
        None => run_timer(settings_path, RunArgs::default()).await?,
        Some(Commands::Settings(command)) => settings_command(settings_path, command)?,
        Some(Commands::Completions { shell }) => generate_completions(shell),
    }

    Ok(())
}

/// Opens the settings store with the platform autostart backend.
///
/// A missing home or config directory only disables autostart; settings
/// are still read and written.
fn open_store(settings_path: PathBuf) -> SettingsStore {
    SettingsStore::new(settings_path, autostart::platform_registry_or_unavailable())
}

/// Runs the timer until exit is requested or Ctrl-C is pressed.
async fn run_timer(settings_path: PathBuf, args: RunArgs) -> Result<()> {
    let store = open_store(settings_path);

    let mut sinks = SinkSet::new();
    sinks = if args.no_notify {
        sinks.with(LogNotifier)
    } else {
        sinks.with(DesktopNotifier::new())
    };
    sinks = sinks.with(ConsoleSink);

    let mut tray = None;
    if !args.no_tray {
        let (sink, rx) = TraySink::channel();
        sinks = sinks.with(sink);
        tray = Some(TrayIconManager::new(rx));
    }

    let app = App::new(store, sinks);

    if let Some(mut manager) = tray.take() {
        match manager.initialize(&app.status_text()) {
            Ok(()) => tray = Some(manager),
            Err(e) => tracing::warn!("Tray unavailable: {:#}", e),
        }
    }

    let (tx, rx) = mpsc::unbounded_channel();
    console::spawn_stdin_reader(tx).context("Failed to start console input")?;
    println!("{}", CONSOLE_HELP);

    let mut event_loop = EventLoop::new(app, rx).with_response_handler(Display::show_response);
    if let Some(manager) = tray {
        event_loop = event_loop.with_tray(manager);
    }

    let app = event_loop.run().await;
    println!();
    tracing::info!(status = %app.status_text(), "timer stopped");

    Ok(())
}

/// Handles `settings show|set|path`.
fn settings_command(settings_path: PathBuf, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Path => {
            println!("{}", settings_path.display());
        }
        SettingsCommand::Show { json } => {
            let mut store = open_store(settings_path);
            store.load();
            let view = SettingsView::from_store(&store, false);
            if json {
                Display::show_settings_json(&view).context("Failed to serialize settings")?;
            } else {
                Display::show_settings(&view);
            }
        }
        SettingsCommand::Set(args) => {
            if args.is_empty() {
                anyhow::bail!("Nothing to change (use --work, --rest or --autostart)");
            }
            let mut store = open_store(settings_path);
            let current = store.load();
            let config = store.save(merge_draft(SettingsDraft::from(current), &args));
            Display::show_response(&ShellResponse::Saved(config));
        }
    }
    Ok(())
}

/// Overlays the given values on the stored settings.
fn merge_draft(mut draft: SettingsDraft, args: &SetArgs) -> SettingsDraft {
    if let Some(work) = args.work {
        draft.work_minutes = work;
    }
    if let Some(rest) = args.rest {
        draft.rest_minutes = rest;
    }
    if let Some(autostart) = args.autostart {
        draft.auto_start_enabled = autostart;
    }
    draft
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

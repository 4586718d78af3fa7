//! Application object tying the phase controller to the settings store.
//!
//! The presentation shell (tray menu or console) never touches the
//! controller or store directly; it sends a [`ShellCommand`] to
//! [`App::dispatch`] and renders the returned [`ShellResponse`].

use std::path::PathBuf;

use serde::Serialize;

use crate::notification::NotificationSink;
use crate::settings::SettingsStore;
use crate::types::{SettingsDraft, TimerConfig};

use super::timer::{PhaseController, TickOutcome};

// ============================================================================
// ShellCommand / ShellResponse
// ============================================================================

/// User gestures coming from the presentation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show the settings surface
    OpenSettings,
    /// Quit the application
    RequestExit,
    /// Pause or resume the countdown
    TogglePause,
    /// Store new settings and restart the work phase
    SaveSettings(SettingsDraft),
    /// Report the current status string
    ShowStatus,
}

/// What the settings surface shows when opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsView {
    /// Settings in effect
    pub config: TimerConfig,
    /// Whether the countdown is paused
    pub paused: bool,
    /// Where the settings record lives
    pub settings_path: PathBuf,
    /// Where the autostart entry lives
    pub autostart_location: String,
    /// Whether an autostart entry currently exists
    pub autostart_registered: bool,
}

impl SettingsView {
    /// Describes the settings held by `store`.
    pub fn from_store(store: &SettingsStore, paused: bool) -> Self {
        let registry = store.registry();
        Self {
            config: store.current(),
            paused,
            settings_path: store.path().to_path_buf(),
            autostart_location: registry.location(),
            autostart_registered: registry.is_registered(),
        }
    }
}

/// Result of dispatching a [`ShellCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellResponse {
    /// Settings surface contents
    Settings(SettingsView),
    /// Pause state after a toggle
    PauseToggled {
        /// New pause flag
        paused: bool,
    },
    /// Settings accepted
    Saved(TimerConfig),
    /// Current status string
    Status(String),
    /// The shell should shut down
    Exit,
}

// ============================================================================
// App
// ============================================================================

/// The single owned timer application.
pub struct App<N: NotificationSink> {
    store: SettingsStore,
    controller: PhaseController<N>,
}

impl<N: NotificationSink> App<N> {
    /// Loads settings and starts a Working phase.
    pub fn new(mut store: SettingsStore, sink: N) -> Self {
        let config = store.load();
        tracing::info!(
            work_minutes = config.work_minutes,
            rest_minutes = config.rest_minutes,
            auto_start = config.auto_start_enabled,
            "timer starting"
        );
        let controller = PhaseController::new(config, sink);
        Self { store, controller }
    }

    /// Handles one shell command.
    pub fn dispatch(&mut self, command: ShellCommand) -> ShellResponse {
        tracing::debug!(?command, "shell command");
        match command {
            ShellCommand::OpenSettings => ShellResponse::Settings(self.open_settings()),
            ShellCommand::RequestExit => self.request_exit(),
            ShellCommand::TogglePause => ShellResponse::PauseToggled {
                paused: self.toggle_pause(),
            },
            ShellCommand::SaveSettings(draft) => ShellResponse::Saved(self.save_settings(
                draft.work_minutes,
                draft.rest_minutes,
                draft.auto_start_enabled,
            )),
            ShellCommand::ShowStatus => ShellResponse::Status(self.status_text()),
        }
    }

    pub fn open_settings(&self) -> SettingsView {
        SettingsView::from_store(&self.store, self.controller.state().paused)
    }

    pub fn request_exit(&mut self) -> ShellResponse {
        tracing::info!("exit requested");
        ShellResponse::Exit
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.controller.toggle_pause()
    }

    /// Saves settings and restarts from a fresh Working phase.
    pub fn save_settings(
        &mut self,
        work_minutes: i64,
        rest_minutes: i64,
        auto_start: bool,
    ) -> TimerConfig {
        let config = self
            .store
            .save(SettingsDraft::new(work_minutes, rest_minutes, auto_start));
        self.controller.reconfigure(config);
        config
    }

    /// Forwards one elapsed second to the controller.
    pub fn tick(&mut self) -> TickOutcome {
        self.controller.tick()
    }

    pub fn status_text(&self) -> String {
        self.controller.status_text()
    }

    pub fn controller(&self) -> &PhaseController<N> {
        &self.controller
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }
}

impl<N: NotificationSink> std::fmt::Debug for App<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("controller", &self.controller)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autostart::{AutostartRegistry, MockAutostart};
    use crate::notification::MockNotificationSink;
    use crate::types::Phase;
    use std::sync::Arc;

    struct Fixture {
        app: App<Arc<MockNotificationSink>>,
        sink: Arc<MockNotificationSink>,
        autostart: Arc<MockAutostart>,
        _dir: tempfile::TempDir,
    }

    fn create_app() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let autostart = Arc::new(MockAutostart::new());
        let store = SettingsStore::new(
            dir.path().join("settings.ini"),
            Box::new(Arc::clone(&autostart)),
        )
        .with_executable("/usr/bin/pomotray");
        let sink = Arc::new(MockNotificationSink::new());
        let app = App::new(store, Arc::clone(&sink));
        Fixture {
            app,
            sink,
            autostart,
            _dir: dir,
        }
    }

    #[test]
    fn test_new_app_runs_working() {
        let fixture = create_app();
        assert_eq!(fixture.app.status_text(), "Working (25:00)");
        assert_eq!(fixture.app.controller().state().phase, Phase::Working);
    }

    #[test]
    fn test_dispatch_toggle_pause() {
        let mut fixture = create_app();

        let response = fixture.app.dispatch(ShellCommand::TogglePause);

        assert_eq!(response, ShellResponse::PauseToggled { paused: true });
        assert_eq!(fixture.sink.last_status().as_deref(), Some("Paused"));
    }

    #[test]
    fn test_dispatch_request_exit() {
        let mut fixture = create_app();
        assert_eq!(
            fixture.app.dispatch(ShellCommand::RequestExit),
            ShellResponse::Exit
        );
    }

    #[test]
    fn test_dispatch_open_settings() {
        let mut fixture = create_app();

        let ShellResponse::Settings(view) = fixture.app.dispatch(ShellCommand::OpenSettings)
        else {
            panic!("Expected settings view");
        };

        assert_eq!(view.config, TimerConfig::default());
        assert!(!view.paused);
        assert!(view.settings_path.ends_with("settings.ini"));
        assert!(!view.autostart_registered);
    }

    #[test]
    fn test_save_settings_resets_to_working() {
        let mut fixture = create_app();
        fixture.app.tick();

        let response = fixture
            .app
            .dispatch(ShellCommand::SaveSettings(SettingsDraft::new(50, 10, true)));

        let ShellResponse::Saved(config) = response else {
            panic!("Expected saved response");
        };
        assert_eq!(config.work_minutes, 50);
        assert_eq!(fixture.app.status_text(), "Working (50:00)");
        assert!(fixture.autostart.is_registered());
    }

    #[test]
    fn test_save_settings_invalid_work_kept() {
        let mut fixture = create_app();

        let config = fixture.app.save_settings(-5, 10, true);

        assert_eq!(config.work_minutes, 25);
        assert_eq!(config.rest_minutes, 10);
        assert_eq!(fixture.app.controller().config().rest_minutes, 10);
    }

    #[test]
    fn test_show_status() {
        let mut fixture = create_app();
        assert_eq!(
            fixture.app.dispatch(ShellCommand::ShowStatus),
            ShellResponse::Status("Working (25:00)".to_string())
        );
    }
}

//! Integration tests for the phase controller and settings store.
//!
//! These tests drive the library the way the event loop does:
//! - Full work phase ending in a rest phase
//! - Pause and resume around ticks
//! - Saving settings while a phase is running
//! - Settings records surviving a restart

use std::sync::Arc;

use pomotray::autostart::{self, AutostartError, AutostartRegistry, MockAutostart};
use pomotray::daemon::{App, PhaseController, ShellCommand, ShellResponse, TickOutcome};
use pomotray::notification::MockNotificationSink;
use pomotray::settings::{read_record, SettingsStore};
use pomotray::types::{Phase, SettingsDraft, TimerConfig};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_controller(
    config: TimerConfig,
) -> (
    PhaseController<Arc<MockNotificationSink>>,
    Arc<MockNotificationSink>,
) {
    let sink = Arc::new(MockNotificationSink::new());
    (PhaseController::new(config, Arc::clone(&sink)), sink)
}

fn tick_n<N: pomotray::NotificationSink>(controller: &mut PhaseController<N>, n: u32) {
    for _ in 0..n {
        controller.tick();
    }
}

struct AppFixture {
    app: App<Arc<MockNotificationSink>>,
    sink: Arc<MockNotificationSink>,
    autostart: Arc<MockAutostart>,
    dir: tempfile::TempDir,
}

fn create_app() -> AppFixture {
    let dir = tempfile::tempdir().unwrap();
    let autostart = Arc::new(MockAutostart::new());
    let store = SettingsStore::new(
        dir.path().join("settings.ini"),
        Box::new(Arc::clone(&autostart)),
    )
    .with_executable("/opt/pomotray/pomotray");
    let sink = Arc::new(MockNotificationSink::new());
    let app = App::new(store, Arc::clone(&sink));
    AppFixture {
        app,
        sink,
        autostart,
        dir,
    }
}

// ============================================================================
// Phase Cycle
// ============================================================================

mod phase_cycle {
    use super::*;

    #[test]
    fn test_full_work_phase_switches_to_rest() {
        let (mut controller, sink) = create_controller(TimerConfig::default());

        tick_n(&mut controller, 1499);
        assert_eq!(controller.state().phase, Phase::Working);
        assert_eq!(controller.status_text(), "Working (0:01)");
        assert_eq!(sink.notification_count(), 0);

        let outcome = controller.tick();

        assert_eq!(
            outcome,
            TickOutcome::PhaseCompleted {
                ended: Phase::Working,
                started: Phase::Resting,
            }
        );
        assert_eq!(controller.state().phase, Phase::Resting);
        assert_eq!(controller.state().remaining_seconds, 300);
        assert_eq!(controller.status_text(), "Resting (5:00)");
        assert_eq!(
            sink.get_notifications(),
            vec![("Time to take a break!".to_string(), String::new())]
        );
    }

    #[test]
    fn test_rest_phase_switches_back_to_work() {
        let (mut controller, sink) = create_controller(TimerConfig::default());

        tick_n(&mut controller, 1500 + 300);

        assert_eq!(controller.state().phase, Phase::Working);
        assert_eq!(controller.state().remaining_seconds, 1500);
        let notifications = sink.get_notifications();
        assert_eq!(notifications.len(), 2);
        assert_eq!(
            notifications[1],
            (
                "Break time over!".to_string(),
                "Ready to focus again?".to_string()
            )
        );
    }

    #[test]
    fn test_cycle_repeats_with_custom_durations() {
        let config = TimerConfig {
            work_minutes: 2,
            rest_minutes: 1,
            auto_start_enabled: false,
        };
        let (mut controller, sink) = create_controller(config);

        // Two complete work/rest cycles.
        tick_n(&mut controller, 2 * (120 + 60));

        assert_eq!(controller.state().phase, Phase::Working);
        assert_eq!(controller.state().remaining_seconds, 120);
        assert_eq!(sink.notification_count(), 4);
    }

    #[test]
    fn test_status_published_every_tick() {
        let (mut controller, sink) = create_controller(TimerConfig::default());
        sink.clear_recorded();

        tick_n(&mut controller, 5);

        assert_eq!(sink.status_count(), 5);
        assert_eq!(sink.last_status().as_deref(), Some("Working (24:55)"));
    }
}

// ============================================================================
// Pause / Resume
// ============================================================================

mod pause_resume {
    use super::*;

    #[test]
    fn test_ticks_while_paused_do_not_count() {
        let (mut controller, sink) = create_controller(TimerConfig::default());

        tick_n(&mut controller, 100);
        assert!(controller.toggle_pause());
        tick_n(&mut controller, 50);
        assert_eq!(controller.status_text(), "Paused");
        assert!(!controller.toggle_pause());
        tick_n(&mut controller, 10);

        assert_eq!(controller.state().remaining_seconds, 1390);
        assert_eq!(controller.status_text(), "Working (23:10)");
        assert_eq!(sink.notification_count(), 0);
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let (mut controller, _sink) = create_controller(TimerConfig::default());
        tick_n(&mut controller, 42);
        let before = controller.state().clone();

        controller.toggle_pause();
        controller.toggle_pause();

        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_pause_suppresses_phase_completion() {
        let config = TimerConfig {
            work_minutes: 1,
            rest_minutes: 1,
            auto_start_enabled: false,
        };
        let (mut controller, sink) = create_controller(config);

        tick_n(&mut controller, 59);
        controller.toggle_pause();
        tick_n(&mut controller, 500);

        assert_eq!(controller.state().phase, Phase::Working);
        assert_eq!(controller.state().remaining_seconds, 1);
        assert_eq!(sink.notification_count(), 0);
    }
}

// ============================================================================
// Settings
// ============================================================================

mod settings_flow {
    use super::*;

    #[test]
    fn test_save_restarts_work_and_persists() {
        let mut fixture = create_app();
        for _ in 0..30 {
            fixture.app.tick();
        }

        let response = fixture
            .app
            .dispatch(ShellCommand::SaveSettings(SettingsDraft::new(45, 15, true)));

        let expected = TimerConfig {
            work_minutes: 45,
            rest_minutes: 15,
            auto_start_enabled: true,
        };
        assert_eq!(response, ShellResponse::Saved(expected));
        assert_eq!(fixture.app.status_text(), "Working (45:00)");
        assert_eq!(
            read_record(&fixture.dir.path().join("settings.ini")).unwrap(),
            expected
        );
        assert_eq!(
            fixture.autostart.registered_path().as_deref(),
            Some(std::path::Path::new("/opt/pomotray/pomotray"))
        );
    }

    #[test]
    fn test_save_while_paused_stays_paused() {
        let mut fixture = create_app();
        fixture.app.dispatch(ShellCommand::TogglePause);

        fixture
            .app
            .dispatch(ShellCommand::SaveSettings(SettingsDraft::new(30, 5, false)));

        assert!(fixture.app.controller().state().paused);
        assert_eq!(fixture.app.status_text(), "Paused");
        assert_eq!(fixture.app.controller().state().remaining_seconds, 1800);
        assert_eq!(fixture.sink.last_status().as_deref(), Some("Paused"));
    }

    #[test]
    fn test_rejected_fields_keep_previous_values() {
        let mut fixture = create_app();

        let config = fixture.app.save_settings(0, -3, false);

        assert_eq!(config, TimerConfig::default());
        assert_eq!(fixture.app.status_text(), "Working (25:00)");
    }

    #[test]
    fn test_autostart_failure_is_not_fatal() {
        let mut fixture = create_app();
        fixture.autostart.set_should_fail(true);

        let config = fixture.app.save_settings(50, 10, true);

        assert_eq!(config.work_minutes, 50);
        assert!(!fixture.autostart.is_registered());
        assert_eq!(
            read_record(&fixture.dir.path().join("settings.ini"))
                .unwrap()
                .work_minutes,
            50
        );
    }

    #[test]
    fn test_save_without_home_directory_still_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        let registry =
            autostart::registry_or_unavailable(Err(AutostartError::HomeDirectoryNotFound));
        let store = SettingsStore::new(&path, registry).with_executable("/opt/pomotray/pomotray");
        let mut app = App::new(store, MockNotificationSink::new());

        let response = app.dispatch(ShellCommand::SaveSettings(SettingsDraft::new(30, 5, true)));

        let expected = TimerConfig {
            work_minutes: 30,
            rest_minutes: 5,
            auto_start_enabled: true,
        };
        assert_eq!(response, ShellResponse::Saved(expected));
        assert_eq!(app.status_text(), "Working (30:00)");
        assert_eq!(read_record(&path).unwrap(), expected);

        match app.dispatch(ShellCommand::OpenSettings) {
            ShellResponse::Settings(view) => {
                assert!(!view.autostart_registered);
                assert!(view.autostart_location.starts_with("unavailable"));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_settings_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ini");

        {
            let mut store = SettingsStore::new(&path, Box::new(MockAutostart::new()));
            store.load();
            store.save(SettingsDraft::new(40, 10, false));
        }

        let store = SettingsStore::new(&path, Box::new(MockAutostart::new()));
        let app = App::new(store, MockNotificationSink::new());

        assert_eq!(app.status_text(), "Working (40:00)");
        assert_eq!(app.controller().config().rest_minutes, 10);
    }

    #[test]
    fn test_corrupt_record_falls_back_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        std::fs::write(&path, "abc 12 1").unwrap();

        let mut store = SettingsStore::new(&path, Box::new(MockAutostart::new()));
        let config = store.load();

        assert_eq!(config.work_minutes, 25);
        assert_eq!(config.rest_minutes, 12);
        assert!(config.auto_start_enabled);
    }

    #[test]
    fn test_open_settings_reports_registration() {
        let mut fixture = create_app();
        fixture.app.save_settings(25, 5, true);

        let ShellResponse::Settings(view) = fixture.app.dispatch(ShellCommand::OpenSettings)
        else {
            panic!("Expected settings view");
        };

        assert!(view.config.auto_start_enabled);
        assert!(view.autostart_registered);
    }
}

//! Single-threaded event loop.
//!
//! Everything touching timer state runs on one task: the one-second ticker,
//! shell commands from the console, tray menu clicks and the shutdown
//! signal are multiplexed with `tokio::select!`.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};

use crate::menubar::TrayIconManager;
use crate::notification::NotificationSink;

use super::app::{App, ShellCommand, ShellResponse};
use super::schedule::TICK_INTERVAL;

/// How often the tray menu is checked for clicks.
pub const TRAY_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

/// Callback receiving every response produced by a shell command.
pub type ResponseHandler = Box<dyn FnMut(&ShellResponse)>;

/// Drives an [`App`] until exit is requested or the shutdown future
/// resolves.
pub struct EventLoop<N: NotificationSink> {
    app: App<N>,
    commands: mpsc::UnboundedReceiver<ShellCommand>,
    tray: Option<TrayIconManager>,
    on_response: ResponseHandler,
}

impl<N: NotificationSink> EventLoop<N> {
    pub fn new(app: App<N>, commands: mpsc::UnboundedReceiver<ShellCommand>) -> Self {
        Self {
            app,
            commands,
            tray: None,
            on_response: Box::new(|_| {}),
        }
    }

    /// Attaches a tray whose updates and menu clicks are serviced by the loop.
    pub fn with_tray(mut self, tray: TrayIconManager) -> Self {
        self.tray = Some(tray);
        self
    }

    pub fn with_response_handler(mut self, handler: impl FnMut(&ShellResponse) + 'static) -> Self {
        self.on_response = Box::new(handler);
        self
    }

    /// Runs until exit is requested or Ctrl-C is received.
    pub async fn run(self) -> App<N> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Runs until exit is requested or `shutdown` resolves, then hands the
    /// app back.
    pub async fn run_until<F>(mut self, shutdown: F) -> App<N>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut generation = self.app.controller().schedule().generation();
        let mut ticker = new_ticker();
        let mut tray_poll = interval(TRAY_POLL_INTERVAL);
        tray_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let has_tray = self.tray.is_some();
        let mut commands_open = true;

        loop {
            // A re-arm starts a fresh one-second period.
            let current = self.app.controller().schedule().generation();
            if current != generation {
                generation = current;
                ticker = new_ticker();
            }
            let armed = self.app.controller().schedule().is_armed();

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutdown signal received");
                    break;
                }
                _ = ticker.tick(), if armed => {
                    self.app.tick();
                }
                command = self.commands.recv(), if commands_open => {
                    match command {
                        Some(command) => {
                            if self.handle_command(command) {
                                break;
                            }
                        }
                        None => {
                            tracing::debug!("command channel closed");
                            commands_open = false;
                        }
                    }
                }
                _ = tray_poll.tick(), if has_tray => {
                    if self.service_tray() {
                        break;
                    }
                }
            }
        }

        if let Some(tray) = self.tray.as_mut() {
            tray.shutdown();
        }
        self.app
    }

    /// Dispatches one command. Returns true when the loop should stop.
    fn handle_command(&mut self, command: ShellCommand) -> bool {
        let response = self.app.dispatch(command);
        (self.on_response)(&response);
        response == ShellResponse::Exit
    }

    /// Applies queued tray updates and handles at most one menu click.
    fn service_tray(&mut self) -> bool {
        let Some(tray) = self.tray.as_mut() else {
            return false;
        };
        tray.process_pending_updates();
        match tray.poll_menu_command() {
            Some(command) => self.handle_command(command),
            None => false,
        }
    }
}

impl<N: NotificationSink> std::fmt::Debug for EventLoop<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("app", &self.app)
            .field("tray", &self.tray)
            .finish_non_exhaustive()
    }
}

fn new_ticker() -> Interval {
    let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

//! Terminal presentation shell.
//!
//! Reads commands from stdin line by line and shows the live status on a
//! single rewritten terminal line.
//!
//! | Input                          | Command          |
//! |--------------------------------|------------------|
//! | `p`, `pause`, `resume`         | toggle pause     |
//! | `s`, `settings`                | open settings    |
//! | `save <work> <rest> <on\|off>` | save settings    |
//! | `status`                       | show status      |
//! | `q`, `quit`, `exit`            | exit             |

use std::io::{BufRead, Write};
use std::thread::JoinHandle;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::notification::NotificationSink;
use crate::types::SettingsDraft;

use super::app::ShellCommand;

/// Help text listing console commands.
pub const CONSOLE_HELP: &str = "\
Commands:
  p | pause | resume              pause or resume the countdown
  s | settings                    show current settings
  save <work> <rest> <on|off>     save durations (minutes) and autostart
  status                          show the countdown
  q | quit | exit                 quit";

/// Errors produced while parsing a console line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Unknown command: {0} (type `help`)")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid {field}: {value} is not a whole number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid autostart flag: {0} (use on/off)")]
    InvalidFlag(String),
}

/// One parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(ShellCommand),
    Help,
    Empty,
}

/// Parses one console line.
///
/// # Errors
/// Returns an error for unknown commands or malformed `save` arguments.
pub fn parse_line(line: &str) -> Result<ConsoleInput, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ConsoleInput::Empty);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "p" | "pause" | "resume" => ShellCommand::TogglePause,
        "s" | "settings" => ShellCommand::OpenSettings,
        "status" => ShellCommand::ShowStatus,
        "q" | "quit" | "exit" => ShellCommand::RequestExit,
        "h" | "help" | "?" => return Ok(ConsoleInput::Help),
        "save" => {
            let work = parse_number(words.next(), "work")?;
            let rest = parse_number(words.next(), "rest")?;
            let auto_start = parse_flag(words.next())?;
            ShellCommand::SaveSettings(SettingsDraft::new(work, rest, auto_start))
        }
        _ => return Err(ConsoleError::UnknownCommand(head.to_string())),
    };

    Ok(ConsoleInput::Command(command))
}

fn parse_number(word: Option<&str>, field: &'static str) -> Result<i64, ConsoleError> {
    let word = word.ok_or(ConsoleError::MissingArgument(field))?;
    word.parse().map_err(|_| ConsoleError::InvalidNumber {
        field,
        value: word.to_string(),
    })
}

fn parse_flag(word: Option<&str>) -> Result<bool, ConsoleError> {
    let word = word.ok_or(ConsoleError::MissingArgument("autostart"))?;
    match word.to_ascii_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Ok(true),
        "off" | "0" | "false" | "no" => Ok(false),
        _ => Err(ConsoleError::InvalidFlag(word.to_string())),
    }
}

/// Reads console lines and forwards commands until input ends or the
/// receiver goes away.
pub fn read_commands<R: BufRead>(reader: R, tx: &mpsc::UnboundedSender<ShellCommand>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read console input: {}", e);
                return;
            }
        };

        match parse_line(&line) {
            Ok(ConsoleInput::Command(command)) => {
                if tx.send(command).is_err() {
                    return;
                }
            }
            Ok(ConsoleInput::Help) => println!("{}", CONSOLE_HELP),
            Ok(ConsoleInput::Empty) => {}
            Err(e) => eprintln!("{}", e),
        }
    }
    tracing::debug!("console input closed");
}

/// Reads stdin on a dedicated thread.
///
/// A blocking read cannot be cancelled, so the thread is left detached and
/// ends with the process.
///
/// # Errors
/// Returns an error if the thread cannot be spawned.
pub fn spawn_stdin_reader(
    tx: mpsc::UnboundedSender<ShellCommand>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("console-input".to_string())
        .spawn(move || read_commands(std::io::stdin().lock(), &tx))
}

/// Shows status on one terminal line and prints notifications above it.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, title: &str, body: &str) {
        if body.is_empty() {
            println!("\r\x1b[2K** {}", title);
        } else {
            println!("\r\x1b[2K** {} {}", title, body);
        }
    }

    fn set_status(&self, status: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "\r\x1b[2K{}", status);
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_toggle_aliases() {
            for line in ["p", "pause", "resume", "PAUSE"] {
                assert_eq!(
                    parse_line(line),
                    Ok(ConsoleInput::Command(ShellCommand::TogglePause))
                );
            }
        }

        #[test]
        fn test_parse_exit_aliases() {
            for line in ["q", "quit", "exit"] {
                assert_eq!(
                    parse_line(line),
                    Ok(ConsoleInput::Command(ShellCommand::RequestExit))
                );
            }
        }

        #[test]
        fn test_parse_settings_and_status() {
            assert_eq!(
                parse_line("settings"),
                Ok(ConsoleInput::Command(ShellCommand::OpenSettings))
            );
            assert_eq!(
                parse_line("  status  "),
                Ok(ConsoleInput::Command(ShellCommand::ShowStatus))
            );
        }

        #[test]
        fn test_parse_empty_and_help() {
            assert_eq!(parse_line("   "), Ok(ConsoleInput::Empty));
            assert_eq!(parse_line("help"), Ok(ConsoleInput::Help));
        }

        #[test]
        fn test_parse_save() {
            assert_eq!(
                parse_line("save 50 10 on"),
                Ok(ConsoleInput::Command(ShellCommand::SaveSettings(
                    SettingsDraft::new(50, 10, true)
                )))
            );
        }

        #[test]
        fn test_parse_save_keeps_negative_for_validation() {
            assert_eq!(
                parse_line("save -5 10 off"),
                Ok(ConsoleInput::Command(ShellCommand::SaveSettings(
                    SettingsDraft::new(-5, 10, false)
                )))
            );
        }

        #[test]
        fn test_parse_save_errors() {
            assert_eq!(
                parse_line("save 25"),
                Err(ConsoleError::MissingArgument("rest"))
            );
            assert_eq!(
                parse_line("save x 5 on"),
                Err(ConsoleError::InvalidNumber {
                    field: "work",
                    value: "x".to_string()
                })
            );
            assert_eq!(
                parse_line("save 25 5 maybe"),
                Err(ConsoleError::InvalidFlag("maybe".to_string()))
            );
        }

        #[test]
        fn test_parse_unknown() {
            assert_eq!(
                parse_line("stop"),
                Err(ConsoleError::UnknownCommand("stop".to_string()))
            );
        }
    }

    mod reader_tests {
        use super::*;

        #[test]
        fn test_read_commands_forwards_valid_lines() {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let input: &[u8] = b"pause\nbogus\n\nsave 30 5 off\nq\n";

            read_commands(input, &tx);
            drop(tx);

            assert_eq!(rx.try_recv(), Ok(ShellCommand::TogglePause));
            assert_eq!(
                rx.try_recv(),
                Ok(ShellCommand::SaveSettings(SettingsDraft::new(30, 5, false)))
            );
            assert_eq!(rx.try_recv(), Ok(ShellCommand::RequestExit));
            assert!(rx.try_recv().is_err());
        }

        #[test]
        fn test_read_commands_stops_when_receiver_dropped() {
            let (tx, rx) = mpsc::unbounded_channel();
            drop(rx);
            let input: &[u8] = b"pause\npause\n";

            read_commands(input, &tx);
            assert!(tx.is_closed());
        }
    }
}

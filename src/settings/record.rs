//! On-disk settings record.
//!
//! The record is three whitespace-separated fields in fixed order:
//! `<work minutes> <rest minutes> <autostart 0|1>`. Each field is read
//! independently; a missing, malformed or non-positive field falls back
//! to its default.

use crate::types::{positive_minutes, TimerConfig};

/// Parses a settings record, falling back per field.
pub fn parse_record(text: &str) -> TimerConfig {
    let defaults = TimerConfig::default();
    let mut fields = text.split_whitespace();

    let work_minutes = parse_minutes(fields.next(), "work", defaults.work_minutes);
    let rest_minutes = parse_minutes(fields.next(), "rest", defaults.rest_minutes);
    let auto_start_enabled = match fields.next() {
        Some("1") => true,
        Some("0") => false,
        Some(other) => {
            tracing::warn!(value = other, "invalid autostart flag in settings, using default");
            defaults.auto_start_enabled
        }
        None => defaults.auto_start_enabled,
    };

    TimerConfig {
        work_minutes,
        rest_minutes,
        auto_start_enabled,
    }
}

fn parse_minutes(field: Option<&str>, name: &str, default: u32) -> u32 {
    let Some(raw) = field else {
        return default;
    };
    match raw.parse::<i64>().ok().and_then(positive_minutes) {
        Some(minutes) => minutes,
        None => {
            tracing::warn!(field = name, value = raw, "invalid duration in settings, using default");
            default
        }
    }
}

/// Renders a settings record.
pub fn format_record(config: &TimerConfig) -> String {
    format!(
        "{} {} {}",
        config.work_minutes,
        config.rest_minutes,
        u8::from(config.auto_start_enabled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let config = parse_record("50 10 1");
        assert_eq!(config.work_minutes, 50);
        assert_eq!(config.rest_minutes, 10);
        assert!(config.auto_start_enabled);
    }

    #[test]
    fn test_parse_tolerates_newlines() {
        let config = parse_record("  30\n7\t0\n");
        assert_eq!(config.work_minutes, 30);
        assert_eq!(config.rest_minutes, 7);
        assert!(!config.auto_start_enabled);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        assert_eq!(parse_record(""), TimerConfig::default());
    }

    #[test]
    fn test_parse_non_positive_falls_back_per_field() {
        let config = parse_record("0 -3 1");
        assert_eq!(config.work_minutes, 25);
        assert_eq!(config.rest_minutes, 5);
        assert!(config.auto_start_enabled);
    }

    #[test]
    fn test_parse_garbage_falls_back_per_field() {
        let config = parse_record("abc 12 yes");
        assert_eq!(config.work_minutes, 25);
        assert_eq!(config.rest_minutes, 12);
        assert!(!config.auto_start_enabled);
    }

    #[test]
    fn test_parse_partial_record() {
        let config = parse_record("45");
        assert_eq!(config.work_minutes, 45);
        assert_eq!(config.rest_minutes, 5);
    }

    #[test]
    fn test_format_record() {
        let config = TimerConfig {
            work_minutes: 40,
            rest_minutes: 8,
            auto_start_enabled: true,
        };
        assert_eq!(format_record(&config), "40 8 1");
        assert_eq!(format_record(&TimerConfig::default()), "25 5 0");
    }
}

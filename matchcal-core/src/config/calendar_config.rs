//! Settings the calendar encoder consumes.

use serde::{Deserialize, Serialize};

use crate::error::{MatchCalError, MatchCalResult};

fn default_team_id() -> u64 {
    81
}

fn default_team_name() -> String {
    "Barça".to_string()
}

fn default_calendar_name() -> String {
    "FC Barcelona Matches".to_string()
}

fn default_calendar_domain() -> String {
    "barca-calendar.vercel.app".to_string()
}

fn default_product_name() -> String {
    "Barca Calendar".to_string()
}

fn default_alarm_minutes_before() -> u32 {
    180
}

fn default_match_duration_minutes() -> u32 {
    120
}

/// Calendar-level settings (`[calendar]` in config.toml).
///
/// Passed to the encoder by reference; the encoder never reads ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Team the feed is built around; decides the Home/Away marker.
    #[serde(default = "default_team_id")]
    pub team_id: u64,

    /// Name used in alarm text ("<team_name> plays in 3 hours!").
    #[serde(default = "default_team_name")]
    pub team_name: String,

    /// X-WR-CALNAME shown by calendar clients.
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    /// Domain used for event UIDs and the PRODID.
    #[serde(default = "default_calendar_domain")]
    pub calendar_domain: String,

    #[serde(default = "default_product_name")]
    pub product_name: String,

    #[serde(default = "default_alarm_minutes_before")]
    pub alarm_minutes_before: u32,

    #[serde(default = "default_match_duration_minutes")]
    pub match_duration_minutes: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            team_id: default_team_id(),
            team_name: default_team_name(),
            calendar_name: default_calendar_name(),
            calendar_domain: default_calendar_domain(),
            product_name: default_product_name(),
            alarm_minutes_before: default_alarm_minutes_before(),
            match_duration_minutes: default_match_duration_minutes(),
        }
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> MatchCalResult<()> {
        if self.calendar_domain.trim().is_empty() {
            return Err(MatchCalError::Config(
                "calendar.calendar_domain must not be empty".into(),
            ));
        }
        if self.calendar_domain.chars().any(|c| c.is_whitespace()) {
            return Err(MatchCalError::Config(format!(
                "calendar.calendar_domain '{}' must not contain whitespace",
                self.calendar_domain
            )));
        }
        if self.match_duration_minutes == 0 {
            return Err(MatchCalError::Config(
                "calendar.match_duration_minutes must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// PRODID value, e.g. `-//barca-calendar.vercel.app//Barca Calendar//EN`.
    pub fn product_id(&self) -> String {
        format!("-//{}//{}//EN", self.calendar_domain, self.product_name)
    }

    /// VALARM TRIGGER value relative to DTSTART.
    pub fn alarm_trigger(&self) -> String {
        let minutes = self.alarm_minutes_before;
        if minutes > 0 && minutes % 60 == 0 {
            format!("-PT{}H", minutes / 60)
        } else {
            format!("-PT{}M", minutes)
        }
    }

    /// Human phrasing of the alarm lead time ("3 hours", "45 minutes").
    pub fn alarm_lead_text(&self) -> String {
        let minutes = self.alarm_minutes_before;
        if minutes > 0 && minutes % 60 == 0 {
            match minutes / 60 {
                1 => "1 hour".to_string(),
                hours => format!("{} hours", hours),
            }
        } else {
            match minutes {
                1 => "1 minute".to_string(),
                _ => format!("{} minutes", minutes),
            }
        }
    }

    pub fn alarm_description(&self) -> String {
        format!("{} plays in {}!", self.team_name, self.alarm_lead_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alarm_is_three_hours() {
        let config = CalendarConfig::default();

        assert_eq!(config.alarm_trigger(), "-PT3H");
        assert_eq!(config.alarm_description(), "Barça plays in 3 hours!");
    }

    #[test]
    fn test_alarm_in_minutes() {
        let config = CalendarConfig {
            alarm_minutes_before: 90,
            ..CalendarConfig::default()
        };

        assert_eq!(config.alarm_trigger(), "-PT90M");
        assert_eq!(config.alarm_lead_text(), "90 minutes");

        let config = CalendarConfig {
            alarm_minutes_before: 60,
            ..CalendarConfig::default()
        };
        assert_eq!(config.alarm_trigger(), "-PT1H");
        assert_eq!(config.alarm_lead_text(), "1 hour");
    }

    #[test]
    fn test_product_id() {
        let config = CalendarConfig::default();
        assert_eq!(
            config.product_id(),
            "-//barca-calendar.vercel.app//Barca Calendar//EN"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = CalendarConfig {
            calendar_domain: "  ".to_string(),
            ..CalendarConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CalendarConfig {
            calendar_domain: "my domain".to_string(),
            ..CalendarConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CalendarConfig {
            match_duration_minutes: 0,
            ..CalendarConfig::default()
        };
        assert!(config.validate().is_err());

        assert!(CalendarConfig::default().validate().is_ok());
    }
}

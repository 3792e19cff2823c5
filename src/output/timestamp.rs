//! Build timestamps for the status document.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::BuilderError;

/// Clock used for status timestamps, from `settings.timezone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timezone {
    #[default]
    Utc,
    /// The system's local time zone
    Local,
}

impl FromStr for Timezone {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(BuilderError::ConfigValidationError {
                reason: format!("settings.timezone must be 'UTC' or 'local', got '{s}'"),
            }),
        }
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("UTC"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// A point in time split into the fields the status document reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    /// Weekday name, e.g. `Monday`
    pub day: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`, 24-hour
    pub time: String,
    /// `UTC`, or the UTC offset for local time
    pub zone: String,
}

impl Timestamp {
    /// The current time on the given clock.
    pub fn now(timezone: Timezone) -> Self {
        match timezone {
            Timezone::Utc => Self::from_datetime(&Utc::now(), "UTC"),
            Timezone::Local => {
                let now = Local::now();
                let zone = now.offset().to_string();
                Self::from_datetime(&now, &zone)
            }
        }
    }

    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>, zone: &str) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            day: datetime.format("%A").to_string(),
            date: datetime.format("%Y-%m-%d").to_string(),
            time: datetime.format("%H:%M:%S").to_string(),
            zone: zone.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timezone_parse() {
        assert_eq!("UTC".parse::<Timezone>().unwrap(), Timezone::Utc);
        assert_eq!(" Local ".parse::<Timezone>().unwrap(), Timezone::Local);
        assert!(matches!(
            "Europe/Paris".parse::<Timezone>(),
            Err(BuilderError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_timestamp_fields() {
        let datetime = Utc.with_ymd_and_hms(2026, 10, 19, 14, 3, 11).unwrap();
        let timestamp = Timestamp::from_datetime(&datetime, "UTC");

        assert_eq!(
            serde_json::to_value(&timestamp).unwrap(),
            serde_json::json!({
                "day": "Monday",
                "date": "2026-10-19",
                "time": "14:03:11",
                "zone": "UTC"
            })
        );
    }

    #[test]
    fn test_now_utc_zone() {
        assert_eq!(Timestamp::now(Timezone::Utc).zone, "UTC");
    }
}

use thiserror::Error;

/// The `sessions` key whose entry defines the race start time.
pub const RACE_SESSION: &str = "race";

/// A session's start time of day, as embedded in its display string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionTime {
    pub hour: u32,
    pub minute: u32,
}

/// Possible errors when resolving a session's start time.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionTimeError {
    /// The display string is empty or whitespace.
    #[error("session entry {0:?} has no time of day")]
    MissingTime(String),

    /// The trailing token is not a valid `HH:MM` time of day.
    #[error("session entry {0:?} has an invalid time of day")]
    InvalidTime(String),

    /// The race session is absent from a record's session table.
    #[error("schedule record has no race session entry")]
    MissingRaceSession,
}

impl SessionTime {
    /// Extract the time of day from a session display string.
    ///
    /// Upstream data embeds it as the trailing whitespace-separated token,
    /// with anything before it being a decorative label: both `"14:30"`
    /// and `"CARRERA 06:00"` parse. Hours run 0-23, minutes 0-59.
    pub fn parse(display: &str) -> Result<SessionTime, SessionTimeError> {
        let token = display
            .split_whitespace()
            .last()
            .ok_or_else(|| SessionTimeError::MissingTime(display.to_string()))?;

        let invalid = || SessionTimeError::InvalidTime(display.to_string());

        let mut parts = token.splitn(2, ':');
        let hour: u32 = parts
            .next()
            .and_then(|h| h.parse().ok())
            .ok_or_else(invalid)?;
        let minute: u32 = parts
            .next()
            .and_then(|m| m.parse().ok())
            .ok_or_else(invalid)?;

        if hour >= 24 || minute >= 60 {
            return Err(invalid());
        }

        Ok(SessionTime { hour, minute })
    }
}

use chrono::{Duration, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::calendar::{SessionTime, SessionTimeError, RACE_SESSION};
use crate::config::RACE_DURATION_MARGIN_HOURS;

/// One Grand Prix weekend on the calendar.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RaceEvent {
    /// Championship round number. Unique, but carries no ordering;
    /// the calendar is ordered by `date`.
    pub round: u32,

    /// The Grand Prix name.
    pub name: String,

    /// The circuit name.
    pub circuit: String,

    /// The race day, interpreted as a local calendar date.
    pub date: NaiveDate,

    /// Display strings for each weekend session, keyed f.e. `fp1`,
    /// `quali` or `race`, in the order of the upstream JSON. Each value
    /// embeds its start time as a trailing `HH:MM` token.
    pub sessions: IndexMap<String, String>,

    /// Whether this is a sprint-format weekend. Only affects display.
    #[serde(default, rename = "isSprint")]
    pub is_sprint: bool,

    /// Country flag identifier, either an emoji or an ISO code.
    /// Passed through untouched; only the flag image lookup interprets it.
    pub flag: String,
}

impl RaceEvent {
    /// The moment the race session starts, in local wall-clock time.
    ///
    /// Times in the schedule carry no zone; they are combined with `date`
    /// as-is, and compared against the local clock later on.
    ///
    /// Fails when the `race` session entry is missing, or does not embed
    /// a time of day.
    pub fn start_instant(&self) -> Result<NaiveDateTime, SessionTimeError> {
        let display = self
            .sessions
            .get(RACE_SESSION)
            .ok_or(SessionTimeError::MissingRaceSession)?;
        let time = SessionTime::parse(display)?;
        Ok(self
            .date
            .and_hms_opt(time.hour, time.minute, 0)
            .expect("valid time of day"))
    }

    /// The moment the race is assumed to be over: its start, plus a fixed
    /// margin approximating the maximum race duration.
    pub fn end_instant(&self) -> Result<NaiveDateTime, SessionTimeError> {
        Ok(self.start_instant()? + Duration::hours(RACE_DURATION_MARGIN_HOURS))
    }
}

/// TV broadcast info for one round.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TvBroadcast {
    /// The round this broadcast covers.
    pub round: u32,

    /// The channel or platform carrying the race.
    pub channel: String,
}

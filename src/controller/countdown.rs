use std::fmt::Formatter;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tokio::time::interval;

use crate::calendar::{RaceEvent, ScheduleIndex};
use crate::config::{LIVE_LABEL, SEASON_FINISHED_LABEL, TICK_PERIOD};
use crate::widget::{flag_url, CountdownWidget, Renderer};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// The countdown display state at one instant.
///
/// Derived fresh from the schedule index on every tick; nothing is
/// carried over from one tick to the next.
#[derive(Clone, Debug, PartialEq)]
pub enum CountdownState<'a> {
    /// Every race of the season is over. Once entered, only a new
    /// schedule can leave this state.
    SeasonEnded,

    /// The target race has started, but the assumed race duration has
    /// not passed yet.
    Live { race: &'a RaceEvent },

    /// The target race has not started; `remaining` counts down to it.
    Counting {
        race: &'a RaceEvent,
        remaining: CountdownSplit,
    },
}

/// A duration broken into zero-padded display components,
/// f.e. `02d 00h 13m 37s`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownSplit {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownSplit {
    /// Split a millisecond duration into days, hours, minutes and seconds.
    /// Each component is truncated, never rounded: one remaining
    /// millisecond still displays as zero seconds.
    pub fn from_millis(millis: i64) -> CountdownSplit {
        CountdownSplit {
            days: millis / MILLIS_PER_DAY,
            hours: millis % MILLIS_PER_DAY / MILLIS_PER_HOUR,
            minutes: millis % MILLIS_PER_HOUR / MILLIS_PER_MINUTE,
            seconds: millis % MILLIS_PER_MINUTE / MILLIS_PER_SECOND,
        }
    }

    pub fn zero() -> CountdownSplit {
        CountdownSplit::from_millis(0)
    }
}

impl std::fmt::Display for CountdownSplit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Drives the countdown to the next race.
///
/// Owns the repeating tick: every second, the full display state is
/// recomputed from the schedule index and the local wall clock, and the
/// resulting payload is handed to the renderer. Recomputing from scratch
/// keeps the tick idempotent; there are no transitions to miss.
pub struct CountdownController {
    index: Arc<ScheduleIndex>,
}

impl CountdownController {
    pub fn new(index: Arc<ScheduleIndex>) -> CountdownController {
        CountdownController { index }
    }

    /// The countdown state at the given instant.
    ///
    /// Pure: the same instant always yields the same state.
    pub fn state_at(&self, now: NaiveDateTime) -> CountdownState<'_> {
        let upcoming = match self.index.next_race(now) {
            Some(upcoming) => upcoming,
            None => return CountdownState::SeasonEnded,
        };

        let until_start = upcoming.start.signed_duration_since(now);
        if until_start.num_milliseconds() < 0 {
            // Started, but within the duration margin, or the index
            // would not have returned it.
            CountdownState::Live {
                race: upcoming.race,
            }
        } else {
            CountdownState::Counting {
                race: upcoming.race,
                remaining: CountdownSplit::from_millis(until_start.num_milliseconds()),
            }
        }
    }

    /// The display payload at the given instant.
    pub fn widget_at(&self, now: NaiveDateTime) -> CountdownWidget {
        let channel = |race: &RaceEvent| {
            self.index
                .broadcast(race.round)
                .map(|b| b.channel.clone())
        };

        match self.state_at(now) {
            CountdownState::SeasonEnded => CountdownWidget {
                race_name: SEASON_FINISHED_LABEL.to_string(),
                flag_url: None,
                is_live: false,
                countdown_text: CountdownSplit::zero().to_string(),
                channel: None,
            },
            CountdownState::Live { race } => CountdownWidget {
                race_name: race.name.clone(),
                flag_url: Some(flag_url(&race.flag)),
                is_live: true,
                countdown_text: LIVE_LABEL.to_string(),
                channel: channel(race),
            },
            CountdownState::Counting { race, remaining } => CountdownWidget {
                race_name: race.name.clone(),
                flag_url: Some(flag_url(&race.flag)),
                is_live: false,
                countdown_text: remaining.to_string(),
                channel: channel(race),
            },
        }
    }

    /// Emit a payload to the renderer once per second, starting
    /// immediately. Never returns; drop the future to stop the countdown.
    pub async fn run(&self, renderer: Arc<dyn Renderer>) {
        let mut ticks = interval(TICK_PERIOD);
        loop {
            ticks.tick().await;
            let now = Local::now().naive_local();
            renderer.display(&self.widget_at(now)).await;
        }
    }
}

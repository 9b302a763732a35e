use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::calendar::{RaceEvent, TvBroadcast};
use crate::config::{LOOKAHEAD_WINDOW_DAYS, RACE_DURATION_MARGIN_HOURS};

/// Read-only index over the season's race schedule.
///
/// Built once after loading the schedule, then queried for the rest of
/// the session. The input list must already be sorted by race date in
/// ascending order; the index relies on that order and does not re-sort.
pub struct ScheduleIndex {
    entries: Vec<ScheduleEntry>,
    broadcasts: HashMap<u32, TvBroadcast>,
}

struct ScheduleEntry {
    race: RaceEvent,

    /// Resolved once at construction. `None` for records whose race
    /// session time could not be parsed; those stay visible on the
    /// calendar, but are excluded from scheduling queries.
    start: Option<NaiveDateTime>,
}

/// The next race on the calendar, with its resolved start instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpcomingRace<'a> {
    pub race: &'a RaceEvent,
    pub start: NaiveDateTime,
}

/// Narrows the race list by completion status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaceFilter {
    All,
    Upcoming,
    Completed,
}

impl ScheduleIndex {
    pub fn new(races: Vec<RaceEvent>, broadcasts: Vec<TvBroadcast>) -> ScheduleIndex {
        let entries = races
            .into_iter()
            .map(|race| {
                let start = match race.start_instant() {
                    Ok(start) => Some(start),
                    Err(err) => {
                        log::warn!("round {} excluded from scheduling: {}", race.round, err);
                        None
                    }
                };
                ScheduleEntry { race, start }
            })
            .collect();

        let broadcasts = broadcasts.into_iter().map(|b| (b.round, b)).collect();

        ScheduleIndex {
            entries,
            broadcasts,
        }
    }

    /// Every race on the calendar, in schedule order.
    pub fn races(&self) -> impl Iterator<Item = &RaceEvent> {
        self.entries.iter().map(|entry| &entry.race)
    }

    pub fn nb_races(&self) -> usize {
        self.entries.len()
    }

    /// The first race that is still running or yet to start: its end
    /// instant is strictly after `now`. Returns `None` once every race
    /// of the season is over.
    pub fn next_race(&self, now: NaiveDateTime) -> Option<UpcomingRace<'_>> {
        let margin = Duration::hours(RACE_DURATION_MARGIN_HOURS);
        self.entries.iter().find_map(|entry| {
            let start = entry.start?;
            if start + margin > now {
                Some(UpcomingRace {
                    race: &entry.race,
                    start,
                })
            } else {
                None
            }
        })
    }

    /// Whether a race should be highlighted as imminent: its start is
    /// strictly in the future, and less than the lookahead window away.
    ///
    /// A race that is already on track is *not* imminent, even though the
    /// countdown still targets it; see `LOOKAHEAD_WINDOW_DAYS`.
    pub fn is_imminent(&self, race: &RaceEvent, now: NaiveDateTime) -> bool {
        let start = match race.start_instant() {
            Ok(start) => start,
            Err(_) => return false,
        };
        start > now && start < now + Duration::days(LOOKAHEAD_WINDOW_DAYS)
    }

    /// The races matching a status filter. A race counts as completed
    /// once the end of its calendar day has passed, so race day itself
    /// always shows under "upcoming".
    pub fn filtered(&self, filter: RaceFilter, now: NaiveDateTime) -> Vec<&RaceEvent> {
        self.races()
            .filter(|race| match filter {
                RaceFilter::All => true,
                RaceFilter::Upcoming => day_end(race) >= now,
                RaceFilter::Completed => day_end(race) < now,
            })
            .collect()
    }

    /// TV broadcast info for a round, if the loaded listing has any.
    pub fn broadcast(&self, round: u32) -> Option<&TvBroadcast> {
        self.broadcasts.get(&round)
    }

    pub fn nb_broadcasts(&self) -> usize {
        self.broadcasts.len()
    }
}

fn day_end(race: &RaceEvent) -> NaiveDateTime {
    race.date.and_hms_opt(23, 59, 59).expect("valid time of day")
}

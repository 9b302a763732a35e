use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDateTime;

use pitwall::calendar::{RaceEvent, RaceFilter, ScheduleIndex, TvBroadcast};
use pitwall::controller::{CountdownController, CountdownState};

/// The first rounds of a season, in the upstream JSON format:
/// session entries embed their start time behind a decorative label,
/// and flags are emojis.
const SCHEDULE_JSON: &str = r#"
[
  {
    "round": 1,
    "name": "Australian Grand Prix",
    "circuit": "Albert Park",
    "date": "2026-03-08",
    "flag": "🇦🇺",
    "sessions": {
      "fp1": "VIERNES 01:30",
      "fp2": "VIERNES 05:00",
      "fp3": "SÁBADO 01:30",
      "quali": "SÁBADO 05:00",
      "race": "CARRERA 06:00"
    }
  },
  {
    "round": 2,
    "name": "Chinese Grand Prix",
    "circuit": "Shanghai International Circuit",
    "date": "2026-03-15",
    "flag": "🇨🇳",
    "isSprint": true,
    "sessions": {
      "fp1": "VIERNES 04:30",
      "sprint_quali": "VIERNES 08:30",
      "sprint_race": "SÁBADO 04:00",
      "quali": "SÁBADO 08:00",
      "race": "CARRERA 08:00"
    }
  },
  {
    "round": 3,
    "name": "Japanese Grand Prix",
    "circuit": "Suzuka",
    "date": "2026-03-29",
    "flag": "🇯🇵",
    "sessions": {
      "fp1": "VIERNES 03:30",
      "fp2": "VIERNES 07:00",
      "fp3": "SÁBADO 03:30",
      "quali": "SÁBADO 07:00",
      "race": "CARRERA 06:00"
    }
  }
]
"#;

const BROADCAST_JSON: &str = r#"
[
  { "round": 1, "channel": "F1 TV" },
  { "round": 3, "channel": "DAZN" }
]
"#;

fn setup() -> Result<CountdownController> {
    // Enable logging output
    let _ = env_logger::builder().is_test(true).try_init();

    let races: Vec<RaceEvent> = serde_json::from_str(SCHEDULE_JSON)?;
    let broadcasts: Vec<TvBroadcast> = serde_json::from_str(BROADCAST_JSON)?;
    let index = ScheduleIndex::new(races, broadcasts);
    Ok(CountdownController::new(Arc::new(index)))
}

fn at(datetime: &str) -> NaiveDateTime {
    datetime.parse().unwrap()
}

#[test]
fn test_schedule_deserializes() -> Result<()> {
    let races: Vec<RaceEvent> = serde_json::from_str(SCHEDULE_JSON)?;

    assert_eq!(3, races.len());
    assert_eq!(
        vec![1, 2, 3],
        races.iter().map(|r| r.round).collect::<Vec<_>>()
    );

    // Sprint flag defaults to false when the key is absent.
    assert!(!races[0].is_sprint);
    assert!(races[1].is_sprint);

    // Session entries keep the order of the upstream JSON.
    assert_eq!(
        vec!["fp1", "fp2", "fp3", "quali", "race"],
        races[0].sessions.keys().collect::<Vec<_>>()
    );

    Ok(())
}

#[test]
fn test_season_walkthrough() -> Result<()> {
    let controller = setup()?;

    // Two days ahead of the opener.
    match controller.state_at(at("2026-03-06T06:00:00")) {
        CountdownState::Counting { race, remaining } => {
            assert_eq!(1, race.round);
            assert_eq!("02d 00h 00m 00s", remaining.to_string());
        }
        state => panic!("expected Counting, got {:?}", state),
    }

    // One hour into the opener.
    match controller.state_at(at("2026-03-08T07:00:00")) {
        CountdownState::Live { race } => assert_eq!(1, race.round),
        state => panic!("expected Live, got {:?}", state),
    }

    // Just past the opener's duration margin, round 2 takes over.
    match controller.state_at(at("2026-03-08T08:00:01")) {
        CountdownState::Counting { race, .. } => assert_eq!(2, race.round),
        state => panic!("expected Counting, got {:?}", state),
    }

    // Mid-sprint-weekend race, still live.
    match controller.state_at(at("2026-03-15T09:59:59")) {
        CountdownState::Live { race } => assert_eq!(2, race.round),
        state => panic!("expected Live, got {:?}", state),
    }

    // After the last race's margin, the season is over for good.
    assert_eq!(
        CountdownState::SeasonEnded,
        controller.state_at(at("2026-03-29T08:00:01"))
    );
    assert_eq!(
        CountdownState::SeasonEnded,
        controller.state_at(at("2026-11-01T00:00:00"))
    );

    Ok(())
}

#[test]
fn test_widget_payloads() -> Result<()> {
    let controller = setup()?;

    let counting = controller.widget_at(at("2026-03-06T06:00:00"));
    assert_eq!("Australian Grand Prix", counting.race_name);
    assert_eq!(
        Some("https://flagcdn.com/w80/au.png".to_string()),
        counting.flag_url
    );
    assert_eq!("02d 00h 00m 00s", counting.countdown_text);
    assert_eq!(Some("F1 TV".to_string()), counting.channel);
    assert!(!counting.is_live);

    // Round 2 has no TV listing.
    let counting = controller.widget_at(at("2026-03-10T00:00:00"));
    assert_eq!("Chinese Grand Prix", counting.race_name);
    assert_eq!(None, counting.channel);

    let live = controller.widget_at(at("2026-03-08T07:00:00"));
    assert!(live.is_live);

    let ended = controller.widget_at(at("2026-12-01T00:00:00"));
    assert_eq!("Season finished", ended.race_name);
    assert_eq!("00d 00h 00m 00s", ended.countdown_text);
    assert_eq!(None, ended.flag_url);

    Ok(())
}

#[test]
fn test_recompute_is_idempotent() -> Result<()> {
    let controller = setup()?;

    for datetime in &[
        "2026-03-06T06:00:00",
        "2026-03-08T07:00:00",
        "2026-12-01T00:00:00",
    ] {
        let now = at(datetime);
        assert_eq!(controller.state_at(now), controller.state_at(now));
        assert_eq!(controller.widget_at(now), controller.widget_at(now));
    }

    Ok(())
}

#[test]
fn test_filters() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let races: Vec<RaceEvent> = serde_json::from_str(SCHEDULE_JSON)?;
    let index = ScheduleIndex::new(races, vec![]);

    let now = at("2026-03-20T12:00:00");
    assert_eq!(3, index.filtered(RaceFilter::All, now).len());
    assert_eq!(
        vec![3],
        index
            .filtered(RaceFilter::Upcoming, now)
            .iter()
            .map(|r| r.round)
            .collect::<Vec<_>>()
    );
    assert_eq!(
        vec![1, 2],
        index
            .filtered(RaceFilter::Completed, now)
            .iter()
            .map(|r| r.round)
            .collect::<Vec<_>>()
    );

    Ok(())
}

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Service version.
#[allow(dead_code)]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent header for outgoing requests.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Flag images are not bundled with this service; they are served
/// straight from the flagcdn.com CDN, which hosts one PNG per
/// ISO 3166-1 alpha-2 code.
pub const FLAG_CDN_PREFIX: &str = "https://flagcdn.com/w80";

/// Fallback ISO code for flag identifiers we cannot resolve.
/// The CDN serves a placeholder image for it.
pub const UNKNOWN_FLAG: &str = "xx";

/// The number of hours after its start that a race counts as running.
/// Once this margin has passed, the next race on the calendar takes over.
pub const RACE_DURATION_MARGIN_HOURS: i64 = 2;

/// Races starting within this number of days are highlighted as imminent.
///
/// Note that this horizon only applies to races that have not started yet;
/// whether a race is currently running is decided by the countdown itself,
/// with `RACE_DURATION_MARGIN_HOURS`.
pub const LOOKAHEAD_WINDOW_DAYS: i64 = 14;

/// The period of the countdown tick. Every tick recomputes the full
/// display state, so this is also how stale the display can get.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Shown in place of a race name once every race of the season is over.
pub const SEASON_FINISHED_LABEL: &str = "Season finished";

/// Shown in place of the countdown while a race is on track.
pub const LIVE_LABEL: &str = "On track now!";

/// Service config.
#[derive(Deserialize)]
pub struct Config {
    /// URL serving the season's race schedule as a JSON array,
    /// sorted by race date in ascending order.
    pub schedule_url: String,

    /// URL serving TV broadcast info per round as a JSON array.
    /// The countdown works without it.
    #[serde(default)]
    pub broadcast_url: Option<String>,
}

impl Config {
    /// Read the config file listed in the `PITWALL_CONFIG` environment variable.
    ///
    /// # Panics
    /// - when `PITWALL_CONFIG` is not set
    /// - when `PITWALL_CONFIG` does not point to a valid TOML config
    /// - when an assertion on one or more values fails
    pub fn load() -> Config {
        const CONFIG_ENV_VAR: &str = "PITWALL_CONFIG";

        fn parse_file(f: PathBuf) -> anyhow::Result<Config> {
            let f_str = std::fs::read_to_string(f)?;
            let config: Config = toml::from_str(&f_str)?;
            Ok(config)
        }

        let env_file = match std::env::var(CONFIG_ENV_VAR) {
            Ok(f) => Some(PathBuf::from(f)).filter(|p| p.is_file()),
            Err(_) => None,
        };

        if let Some(f) = env_file {
            let cfg = parse_file(f).expect("failed to parse config file");
            check_config(&cfg);
            return cfg;
        }

        panic!("cannot locate config: use the '{}' env var", CONFIG_ENV_VAR)
    }
}

/// Try to catch configuration errors early.
fn check_config(config: &Config) {
    assert!(
        !config.schedule_url.is_empty(),
        "config: 'schedule_url' must not be empty!"
    );
}

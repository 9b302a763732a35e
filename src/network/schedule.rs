use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::calendar::{RaceEvent, TvBroadcast};
use crate::config::Config;
use crate::network::HTTP_CLIENT;

/// Possible errors when loading schedule data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Wrong URL, or the host is not available right now.
    #[error("schedule request failed")]
    RequestError(#[from] reqwest::Error),

    /// The host served something other than the expected JSON.
    #[error("failed to parse schedule data")]
    ParseError(#[from] serde_json::Error),
}

/// Fetch the season's race schedule.
pub async fn race_schedule(url: &str) -> Result<Vec<RaceEvent>, FetchError> {
    fetch_json(url).await
}

/// Fetch the TV broadcast listing.
pub async fn tv_broadcasts(url: &str) -> Result<Vec<TvBroadcast>, FetchError> {
    fetch_json(url).await
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let json: String = HTTP_CLIENT.get(url).send().await?.text().await?;
    Ok(serde_json::from_str(&json)?)
}

/// Load everything the countdown needs before it starts.
///
/// The race schedule and the TV listing are fetched concurrently.
/// A failed TV fetch degrades to an empty listing; a failed schedule
/// fetch is fatal. There are no retries: the season data is static,
/// so a restart is the only recovery path.
pub async fn load(config: &Config) -> Result<(Vec<RaceEvent>, Vec<TvBroadcast>), FetchError> {
    let broadcast_url = match &config.broadcast_url {
        Some(url) => url,
        None => return Ok((race_schedule(&config.schedule_url).await?, Vec::new())),
    };

    let (races, broadcasts) = futures::join!(
        race_schedule(&config.schedule_url),
        tv_broadcasts(broadcast_url)
    );

    let broadcasts = match broadcasts {
        Ok(broadcasts) => broadcasts,
        Err(err) => {
            log::warn!("continuing without tv broadcasts: {}", err);
            Vec::new()
        }
    };

    Ok((races?, broadcasts))
}

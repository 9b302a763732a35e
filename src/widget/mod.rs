use async_trait::async_trait;
use serde::Serialize;

pub use flags::*;

mod flags;

/// The per-tick display payload for the countdown header.
///
/// One of these is produced every second and discarded after rendering.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CountdownWidget {
    /// The targeted race's name, or a fixed label once the season is over.
    pub race_name: String,

    /// Flag image URL for the targeted race.
    pub flag_url: Option<String>,

    /// `True` while the targeted race is on track. Renderers typically
    /// add a distinct color cue for it.
    pub is_live: bool,

    /// The formatted remaining duration, or a fixed label while live.
    pub countdown_text: String,

    /// Where to watch, if the TV listing covers the targeted round.
    pub channel: Option<String>,
}

/// Where countdown payloads end up. UIs plug in here; the controller
/// neither knows nor cares how a payload is presented.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn display(&self, widget: &CountdownWidget);
}

/// Renderer that writes one log line per payload.
pub struct LogRenderer;

#[async_trait]
impl Renderer for LogRenderer {
    async fn display(&self, widget: &CountdownWidget) {
        let live_marker = if widget.is_live { " [LIVE]" } else { "" };
        match &widget.channel {
            Some(channel) => log::info!(
                "{}{} | {} | on {}",
                widget.race_name,
                live_marker,
                widget.countdown_text,
                channel
            ),
            None => log::info!(
                "{}{} | {}",
                widget.race_name,
                live_marker,
                widget.countdown_text
            ),
        }
    }
}

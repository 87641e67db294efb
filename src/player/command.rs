use crate::error::{PlayerError, Result};
use serde::Deserialize;

/// Control requests a host page sends as JSON, e.g.
/// `{"action": "setVolume", "value": 0.5}` or `{"action": "playNext"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum HostCommand {
    Play,
    Pause,
    Toggle,
    Mute,
    Unmute,
    SetVolume(f64),
    PlaySong(i64),
    PlayNext,
    PlayPrev,
}

impl HostCommand {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| PlayerError::InvalidCommand(err.to_string()))
    }
}

use thiserror::Error;

/// Everything that can go wrong inside a player widget.
///
/// None of these are fatal: callers log them and fall back to a paused or
/// idle state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error("track index {index} is out of range for a playlist of {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("the playlist has no playable tracks")]
    EmptyPlaylist,
    #[error("playlist entry {position} is missing `{field}`")]
    MissingField { position: usize, field: &'static str },
    #[error("attribute `{name}` has an unusable value `{value}`")]
    InvalidAttribute { name: String, value: String },
    #[error("media playback was rejected: {0}")]
    PlaybackRejected(String),
    #[error("player is busy handling another event")]
    Busy,
    #[error("invalid host command: {0}")]
    InvalidCommand(String),
}

pub type Result<T, E = PlayerError> = std::result::Result<T, E>;

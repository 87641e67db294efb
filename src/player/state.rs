/// Playback state owned by a single controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub current_index: usize,
    pub is_playing: bool,
    pub is_muted: bool,
    /// Always within `[0, 1]`.
    pub volume: f64,
    pub is_scrubbing: bool,
    pub is_buffering: bool,
}

impl PlayerState {
    pub fn new(volume: f64) -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            is_muted: false,
            volume: volume.clamp(0.0, 1.0),
            is_scrubbing: false,
            is_buffering: false,
        }
    }
}

/// Playback position as last reported by the media capability.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub current_time: f64,
    /// `None` until the media knows its length.
    pub duration: Option<f64>,
    /// End of the buffered range covering `current_time`.
    pub buffered_end: f64,
}

impl Progress {
    pub fn played_fraction(&self) -> f64 {
        match self.duration {
            Some(duration) if duration > 0.0 => (self.current_time / duration).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn buffered_fraction(&self) -> f64 {
        match self.duration {
            Some(duration) if duration > 0.0 => (self.buffered_end / duration).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

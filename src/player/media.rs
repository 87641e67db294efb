//! The media capability a player drives.
//!
//! The browser build adapts an `<audio>` element to this trait; everywhere
//! else [`InMemoryMedia`] stands in for it.

use crate::error::{PlayerError, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// A buffered span of media, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Lifecycle notifications reported by the media capability.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    TimeUpdate,
    Progress,
    Waiting,
    Ended,
    VolumeChange,
    /// A play request was refused after it was issued (autoplay policy,
    /// unsupported source, ...).
    PlayRejected(String),
}

pub type MediaEventHandler = Box<dyn FnMut(MediaEvent)>;

/// Commands are fire-and-forget; outcomes arrive later as [`MediaEvent`]s.
pub trait MediaCapability {
    /// Point the element at a new source and start loading it.
    fn load(&mut self, source: &str);
    /// Request playback. Only synchronous refusals are reported here.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);

    fn current_time(&self) -> f64;
    /// `NaN` until metadata is loaded.
    fn duration(&self) -> f64;
    fn volume(&self) -> f64;
    fn is_muted(&self) -> bool;
    fn is_paused(&self) -> bool;
    fn buffered(&self) -> Vec<TimeRange>;

    /// Subscribe to lifecycle events.
    fn on_event(&mut self, handler: MediaEventHandler);
}

/// Delivers events to handlers registered through [`MediaCapability::on_event`].
#[derive(Clone, Default)]
pub struct MediaEventSource {
    handlers: Rc<RefCell<Vec<MediaEventHandler>>>,
}

impl MediaEventSource {
    pub fn subscribe(&self, handler: MediaEventHandler) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn fire(&self, event: MediaEvent) {
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            tracing::debug!("dropping nested media event {event:?}");
            return;
        };
        for handler in handlers.iter_mut() {
            handler(event.clone());
        }
    }
}

/// Media capability with no output device. Keeps the same observable state
/// an audio element would.
pub struct InMemoryMedia {
    pub source: Option<String>,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub paused: bool,
    pub buffered: Vec<TimeRange>,
    /// When set, `play()` fails with this reason.
    pub reject_play: Option<String>,
    pub load_count: usize,
    events: MediaEventSource,
}

impl Default for InMemoryMedia {
    fn default() -> Self {
        Self {
            source: None,
            current_time: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            muted: false,
            paused: true,
            buffered: Vec::new(),
            reject_play: None,
            load_count: 0,
            events: MediaEventSource::default(),
        }
    }
}

impl InMemoryMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for firing events at whoever subscribed.
    pub fn event_source(&self) -> MediaEventSource {
        self.events.clone()
    }
}

impl MediaCapability for InMemoryMedia {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.current_time = 0.0;
        self.duration = f64::NAN;
        self.paused = true;
        self.buffered.clear();
        self.load_count += 1;
    }

    fn play(&mut self) -> Result<()> {
        if let Some(reason) = &self.reject_play {
            return Err(PlayerError::PlaybackRejected(reason.clone()));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn seek(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn buffered(&self) -> Vec<TimeRange> {
        self.buffered.clone()
    }

    fn on_event(&mut self, handler: MediaEventHandler) {
        self.events.subscribe(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_resets_position_and_pauses() {
        let mut media = InMemoryMedia::new();
        media.play().unwrap();
        media.seek(42.0);
        media.load("next.mp3");
        assert_eq!(media.source.as_deref(), Some("next.mp3"));
        assert_eq!(media.current_time(), 0.0);
        assert!(media.is_paused());
        assert!(media.duration().is_nan());
    }

    #[test]
    fn rejected_play_stays_paused() {
        let mut media = InMemoryMedia::new();
        media.reject_play = Some("autoplay".to_string());
        assert_eq!(
            media.play().unwrap_err(),
            PlayerError::PlaybackRejected("autoplay".to_string())
        );
        assert!(media.is_paused());
    }

    #[test]
    fn events_reach_every_subscriber() {
        let mut media = InMemoryMedia::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = seen.clone();
            media.on_event(Box::new(move |event| seen.borrow_mut().push((tag, event))));
        }
        media.event_source().fire(MediaEvent::Waiting);
        assert_eq!(
            *seen.borrow(),
            vec![("a", MediaEvent::Waiting), ("b", MediaEvent::Waiting)]
        );
    }
}

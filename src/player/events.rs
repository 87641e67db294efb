use crate::playlist::Track;
use std::collections::HashMap;
use std::rc::Rc;

/// High-level events a host can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    Play,
    Pause,
    SongChange,
}

impl PlayerEvent {
    pub const ALL: [PlayerEvent; 3] = [
        PlayerEvent::Play,
        PlayerEvent::Pause,
        PlayerEvent::SongChange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlayerEvent::Play => "onplay",
            PlayerEvent::Pause => "onpause",
            PlayerEvent::SongChange => "onsongchange",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

/// Handlers are compared by pointer when removed, so keep the `Rc` you
/// registered around.
pub type EventHandler = Rc<dyn Fn(&Track)>;

/// A queued emission, delivered once the player is no longer borrowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub event: PlayerEvent,
    pub track: Track,
}

#[derive(Clone, Default)]
pub struct EventEmitter {
    handlers: HashMap<PlayerEvent, Vec<EventHandler>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `name`. Unknown names are ignored.
    pub fn on(&mut self, name: &str, handler: EventHandler) -> bool {
        let Some(event) = PlayerEvent::from_name(name) else {
            tracing::debug!("ignoring handler for unknown event `{name}`");
            return false;
        };
        self.handlers.entry(event).or_default().push(handler);
        true
    }

    /// Remove the first registration of `handler` for `name`.
    pub fn off(&mut self, name: &str, handler: &EventHandler) -> bool {
        let Some(handlers) = PlayerEvent::from_name(name).and_then(|e| self.handlers.get_mut(&e))
        else {
            return false;
        };
        match handlers.iter().position(|h| Rc::ptr_eq(h, handler)) {
            Some(index) => {
                handlers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every handler for `event` in registration order.
    pub fn emit(&self, event: PlayerEvent, track: &Track) {
        if let Some(handlers) = self.handlers.get(&event) {
            for handler in handlers {
                handler(track);
            }
        }
    }

    pub fn deliver(&self, notifications: &[Notification]) {
        for notification in notifications {
            self.emit(notification.event, &notification.track);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn track() -> Track {
        Track {
            index: 0,
            title: "Song".to_string(),
            artist: None,
            source: "song.mp3".to_string(),
            artwork: None,
            position: 0,
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> EventHandler {
        let log = log.clone();
        Rc::new(move |_: &Track| log.borrow_mut().push(tag))
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = EventEmitter::new();
        emitter.on("onsongchange", recorder(&log, "first"));
        emitter.on("onsongchange", recorder(&log, "second"));

        emitter.emit(PlayerEvent::SongChange, &track());
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn off_matches_by_identity() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = EventEmitter::new();
        let first = recorder(&log, "first");
        let lookalike = recorder(&log, "first");
        emitter.on("onplay", first.clone());
        emitter.on("onplay", recorder(&log, "second"));

        assert!(!emitter.off("onplay", &lookalike));
        assert!(emitter.off("onplay", &first));
        emitter.emit(PlayerEvent::Play, &track());
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = EventEmitter::new();
        assert!(!emitter.on("onexplode", recorder(&log, "x")));
        assert!(!emitter.off("onexplode", &recorder(&log, "x")));
        for event in PlayerEvent::ALL {
            emitter.emit(event, &track());
        }
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn names_round_trip() {
        for event in PlayerEvent::ALL {
            assert_eq!(PlayerEvent::from_name(event.name()), Some(event));
        }
    }
}

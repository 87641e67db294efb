use super::bridge::EventBridge;
use super::command::HostCommand;
use super::controller::PlaybackController;
use super::events::{EventEmitter, EventHandler};
use super::group::{ConnectedGroup, GroupLink, GroupMember};
use super::media::MediaCapability;
use super::state::PlayerState;
use super::view::PlayerView;
use crate::error::{PlayerError, Result};
use crate::playlist::Playlist;
use crate::settings::PlayerSettings;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type ViewObserver = Box<dyn FnMut(&PlayerView)>;

/// One widget instance: the bridge plus the host-facing emitter.
pub struct PlayerCell<M> {
    bridge: RefCell<EventBridge<M>>,
    events: RefCell<EventEmitter>,
    observer: RefCell<Option<ViewObserver>>,
    last_view: RefCell<Option<PlayerView>>,
}

impl<M: MediaCapability> PlayerCell<M> {
    /// Run `f` against the bridge, then publish the resulting view and
    /// deliver queued events with the bridge released. Returns `None` when
    /// the player is already mid-dispatch.
    pub fn dispatch<R>(&self, f: impl FnOnce(&mut EventBridge<M>) -> R) -> Option<R> {
        let (result, notifications, view) = {
            let Ok(mut bridge) = self.bridge.try_borrow_mut() else {
                tracing::debug!("player busy; dropping reentrant call");
                return None;
            };
            let result = f(&mut bridge);
            let notifications = bridge.controller_mut().take_notifications();
            (result, notifications, bridge.view())
        };

        self.publish(view);
        let emitter = self.events.borrow().clone();
        emitter.deliver(&notifications);
        Some(result)
    }

    fn publish(&self, view: PlayerView) {
        {
            let mut last = self.last_view.borrow_mut();
            if last.as_ref() == Some(&view) {
                return;
            }
            *last = Some(view.clone());
        }
        if let Ok(mut observer) = self.observer.try_borrow_mut() {
            if let Some(observer) = observer.as_mut() {
                observer(&view);
            }
        }
    }
}

impl<M: MediaCapability> GroupMember for PlayerCell<M> {
    fn is_playing(&self) -> bool {
        self.bridge
            .try_borrow()
            .map(|bridge| bridge.controller().state().is_playing)
            .unwrap_or(false)
    }

    fn yield_playback(&self) {
        if self.dispatch(|bridge| bridge.controller_mut().pause()).is_none() {
            tracing::warn!("connected player was busy and could not be paused");
        }
    }
}

/// Host-facing control surface of a player.
pub struct PlayerHandle<M>(Rc<PlayerCell<M>>);

impl<M> Clone for PlayerHandle<M> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<M> PartialEq for PlayerHandle<M> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<M: MediaCapability + 'static> PlayerHandle<M> {
    /// Build a player, join `group` when the settings ask for it and start
    /// listening to media events.
    pub fn new(
        media: M,
        playlist: Playlist,
        settings: PlayerSettings,
        group: Option<&Rc<ConnectedGroup>>,
    ) -> Self {
        let mut controller = PlaybackController::new(media, playlist, settings);
        // Nobody can be listening yet.
        controller.take_notifications();

        let cell = Rc::new(PlayerCell {
            bridge: RefCell::new(EventBridge::new(controller)),
            events: RefCell::new(EventEmitter::new()),
            observer: RefCell::new(None),
            last_view: RefCell::new(None),
        });

        if settings.connected {
            if let Some(group) = group {
                let member: Weak<dyn GroupMember> = Rc::downgrade(&cell) as Weak<dyn GroupMember>;
                let id = group.join(member);
                cell.bridge
                    .borrow_mut()
                    .controller_mut()
                    .attach_group(GroupLink {
                        group: group.clone(),
                        id,
                    });
            }
        }

        let handle = Self(cell);
        handle.subscribe_media();
        handle
    }

    fn subscribe_media(&self) {
        let weak = Rc::downgrade(&self.0);
        self.0
            .bridge
            .borrow_mut()
            .controller_mut()
            .media_mut()
            .on_event(Box::new(move |event| {
                if let Some(cell) = weak.upgrade() {
                    cell.dispatch(move |bridge| bridge.handle_media_event(event));
                }
            }));
    }

    pub fn dispatch<R>(&self, f: impl FnOnce(&mut EventBridge<M>) -> R) -> Option<R> {
        self.0.dispatch(f)
    }

    /// Read-only access; `None` while the player is mid-dispatch.
    pub fn inspect<R>(&self, f: impl FnOnce(&EventBridge<M>) -> R) -> Option<R> {
        self.0.bridge.try_borrow().ok().map(|bridge| f(&bridge))
    }

    /// Register the renderer. It receives the current view immediately and
    /// every changed view afterwards.
    pub fn observe(&self, observer: ViewObserver) {
        *self.0.observer.borrow_mut() = Some(observer);
        self.0.last_view.borrow_mut().take();
        if let Some(view) = self.view() {
            self.0.publish(view);
        }
    }

    pub fn view(&self) -> Option<PlayerView> {
        self.inspect(EventBridge::view)
    }

    pub fn state(&self) -> Option<PlayerState> {
        self.inspect(|bridge| *bridge.controller().state())
    }

    pub fn on(&self, name: &str, handler: EventHandler) -> bool {
        self.0.events.borrow_mut().on(name, handler)
    }

    pub fn off(&self, name: &str, handler: &EventHandler) -> bool {
        self.0.events.borrow_mut().off(name, handler)
    }

    pub fn play(&self) {
        self.dispatch(|bridge| bridge.controller_mut().play());
    }

    pub fn pause(&self) {
        self.dispatch(|bridge| bridge.controller_mut().pause());
    }

    pub fn toggle_playback(&self) {
        self.dispatch(|bridge| bridge.controller_mut().toggle_playback());
    }

    pub fn mute(&self) {
        self.dispatch(|bridge| bridge.controller_mut().mute());
    }

    pub fn unmute(&self) {
        self.dispatch(|bridge| bridge.controller_mut().unmute());
    }

    pub fn toggle_mute(&self) {
        self.dispatch(|bridge| bridge.controller_mut().toggle_mute());
    }

    pub fn set_volume(&self, volume: f64) {
        self.dispatch(|bridge| bridge.controller_mut().set_volume(volume));
    }

    pub fn play_song(&self, index: usize) -> Result<()> {
        self.dispatch(|bridge| bridge.controller_mut().play_track(index))
            .unwrap_or(Err(PlayerError::Busy))
    }

    pub fn play_next(&self) -> Result<()> {
        self.dispatch(|bridge| bridge.controller_mut().next())
            .unwrap_or(Err(PlayerError::Busy))
    }

    pub fn play_prev(&self) -> Result<()> {
        self.dispatch(|bridge| bridge.controller_mut().previous())
            .unwrap_or(Err(PlayerError::Busy))
    }

    pub fn apply(&self, command: HostCommand) -> Result<()> {
        match command {
            HostCommand::Play => self.play(),
            HostCommand::Pause => self.pause(),
            HostCommand::Toggle => self.toggle_playback(),
            HostCommand::Mute => self.mute(),
            HostCommand::Unmute => self.unmute(),
            HostCommand::SetVolume(volume) => self.set_volume(volume),
            HostCommand::PlaySong(index) => {
                let index = usize::try_from(index).map_err(|_| PlayerError::IndexOutOfRange {
                    index,
                    len: self
                        .inspect(|bridge| bridge.controller().playlist().len())
                        .unwrap_or(0),
                })?;
                return self.play_song(index);
            }
            HostCommand::PlayNext => return self.play_next(),
            HostCommand::PlayPrev => return self.play_prev(),
        }
        Ok(())
    }
}

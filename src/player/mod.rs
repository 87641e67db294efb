//! Playback core: everything between the media element and the widget.
//!
//! Data flows one way. Media events and pointer input enter through
//! [`EventBridge`], which drives [`PlaybackController`]. The controller
//! commands the [`MediaCapability`] and queues notifications; [`PlayerHandle`]
//! publishes the resulting [`PlayerView`] and delivers the notifications to
//! host handlers once the player is released.

mod bridge;
mod command;
mod controller;
mod events;
mod group;
mod handle;
mod media;
mod shortcuts;
mod state;
mod view;

#[cfg(test)]
mod testing;

pub use bridge::{
    covering_buffer_end, pointer_fraction, EventBridge, END_SNAP_FRACTION, WHEEL_VOLUME_STEP,
};
pub use command::HostCommand;
pub use controller::PlaybackController;
pub use events::{EventEmitter, EventHandler, Notification, PlayerEvent};
pub use group::{ConnectedGroup, GroupLink, GroupMember, MemberId};
pub use handle::{PlayerCell, PlayerHandle, ViewObserver};
pub use media::{
    InMemoryMedia, MediaCapability, MediaEvent, MediaEventHandler, MediaEventSource, TimeRange,
};
pub use shortcuts::{shortcut_for, KeyPress, Shortcut};
pub use state::{PlayerState, Progress};
pub use view::{format_clock, now_playing_title, percent_width, PlayerView};

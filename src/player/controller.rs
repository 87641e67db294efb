use super::events::{Notification, PlayerEvent};
use super::group::GroupLink;
use super::media::MediaCapability;
use super::state::{PlayerState, Progress};
use crate::error::{PlayerError, Result};
use crate::playlist::{Playlist, Track};
use crate::settings::PlayerSettings;

/// Owns the playlist index and issues commands to the media capability.
///
/// Emissions are queued rather than delivered in place, so handlers never
/// run while the controller is mutably borrowed. Drain them with
/// [`PlaybackController::take_notifications`].
pub struct PlaybackController<M> {
    media: M,
    playlist: Playlist,
    settings: PlayerSettings,
    state: PlayerState,
    progress: Progress,
    group: Option<GroupLink>,
    pending: Vec<Notification>,
}

impl<M: MediaCapability> PlaybackController<M> {
    /// Apply the initial volume and cue the first track without playing it.
    pub fn new(media: M, playlist: Playlist, settings: PlayerSettings) -> Self {
        let mut controller = Self {
            media,
            playlist,
            settings,
            state: PlayerState::new(settings.initial_volume),
            progress: Progress::default(),
            group: None,
            pending: Vec::new(),
        };
        controller.set_volume(settings.initial_volume);
        if !controller.playlist.is_empty() {
            let _ = controller.load_track(0);
        }
        controller
    }

    pub fn attach_group(&mut self, link: GroupLink) {
        self.group = Some(link);
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub(crate) fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.state.current_index)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Switch to track `index` and cue it from the start. Out-of-range
    /// indices are logged and leave everything untouched.
    pub fn load_track(&mut self, index: usize) -> Result<()> {
        let track = match self.playlist.track(index) {
            Ok(track) => track.clone(),
            Err(err) => {
                tracing::warn!("cannot load track: {err}");
                return Err(err);
            }
        };

        self.claim_group();

        self.state.current_index = index;
        self.state.is_playing = false;
        self.state.is_buffering = false;
        self.progress = Progress::default();

        self.media.load(&track.source);
        self.media.seek(0.0);
        self.media.set_volume(self.state.volume);
        self.media.set_muted(self.state.is_muted);

        tracing::debug!(index, title = %track.title, "track loaded");
        self.notify(PlayerEvent::SongChange);
        Ok(())
    }

    /// Load and play track `index`. If this interrupts playback and the new
    /// track is refused outright, `Pause` is emitted so listeners do not keep
    /// treating the widget as playing.
    pub fn play_track(&mut self, index: usize) -> Result<()> {
        let was_playing = self.state.is_playing;
        self.load_track(index)?;
        self.play();
        if was_playing && !self.state.is_playing {
            self.notify(PlayerEvent::Pause);
        }
        Ok(())
    }

    pub fn play(&mut self) {
        if self.playlist.is_empty() {
            tracing::warn!("cannot play: {}", PlayerError::EmptyPlaylist);
            return;
        }

        self.claim_group();
        self.state.is_playing = true;
        if let Err(err) = self.media.play() {
            tracing::warn!("{err}");
            self.state.is_playing = false;
            return;
        }
        self.notify(PlayerEvent::Play);
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.state.is_playing = false;
        self.notify(PlayerEvent::Pause);
    }

    pub fn toggle_playback(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next(&mut self) -> Result<()> {
        let index = self
            .playlist
            .wrap_next(self.state.current_index)
            .ok_or(PlayerError::EmptyPlaylist)?;
        self.play_track(index)
    }

    pub fn previous(&mut self) -> Result<()> {
        let index = self
            .playlist
            .wrap_previous(self.state.current_index)
            .ok_or(PlayerError::EmptyPlaylist)?;
        self.play_track(index)
    }

    /// Clamp to `[0, 1]`, unmute and apply.
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            tracing::warn!("ignoring NaN volume");
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.unmute();
        self.media.set_volume(volume);
        self.state.volume = volume;
    }

    pub fn mute(&mut self) {
        self.media.set_muted(true);
        self.state.is_muted = true;
    }

    pub fn unmute(&mut self) {
        self.media.set_muted(false);
        self.state.is_muted = false;
    }

    pub fn toggle_mute(&mut self) {
        if self.state.is_muted {
            self.unmute();
        } else {
            self.mute();
        }
    }

    /// What to do when the current track finishes.
    pub fn handle_track_end(&mut self) {
        if self.state.is_scrubbing {
            return;
        }
        if !self.settings.play_next_on_end {
            self.pause();
            return;
        }

        let last = self.playlist.len().saturating_sub(1);
        if self.state.current_index >= last {
            if self.settings.loop_at_end {
                let _ = self.play_track(0);
            } else {
                self.pause();
            }
        } else {
            let _ = self.play_track(self.state.current_index + 1);
        }
    }

    /// The media refused a play request after it was issued.
    pub fn revert_to_paused(&mut self, reason: &str) {
        tracing::warn!("{}", PlayerError::PlaybackRejected(reason.to_string()));
        if self.state.is_playing {
            self.media.pause();
            self.state.is_playing = false;
            self.notify(PlayerEvent::Pause);
        }
    }

    /// Adopt volume and mute changes made outside the widget.
    pub fn sync_volume_from_media(&mut self) {
        let volume = self.media.volume();
        if volume.is_finite() {
            self.state.volume = volume.clamp(0.0, 1.0);
        }
        self.state.is_muted = self.media.is_muted();
    }

    pub(crate) fn set_scrubbing(&mut self, scrubbing: bool) {
        self.state.is_scrubbing = scrubbing;
    }

    pub(crate) fn set_buffering(&mut self, buffering: bool) {
        self.state.is_buffering = buffering;
    }

    fn claim_group(&self) {
        if !self.settings.connected {
            return;
        }
        if let Some(link) = &self.group {
            link.claim();
        }
    }

    fn notify(&mut self, event: PlayerEvent) {
        if let Some(track) = self.current_track().cloned() {
            self.pending.push(Notification { event, track });
        }
    }
}

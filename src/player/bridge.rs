//! Translates media lifecycle events and pointer input into controller calls.

use super::controller::PlaybackController;
use super::media::{MediaCapability, MediaEvent, TimeRange};
use super::view::PlayerView;

/// Releasing a seek drag at or past this fraction counts as finishing the
/// track.
pub const END_SNAP_FRACTION: f64 = 0.99;

/// Volume change per wheel notch.
pub const WHEEL_VOLUME_STEP: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Drag {
    #[default]
    Idle,
    Seek,
    Volume,
}

pub struct EventBridge<M> {
    controller: PlaybackController<M>,
    drag: Drag,
}

impl<M: MediaCapability> EventBridge<M> {
    pub fn new(controller: PlaybackController<M>) -> Self {
        Self {
            controller,
            drag: Drag::Idle,
        }
    }

    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<M> {
        &mut self.controller
    }

    pub fn view(&self) -> PlayerView {
        PlayerView::render(&self.controller)
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::Progress => self.on_progress(),
            MediaEvent::Waiting => self.controller.set_buffering(true),
            MediaEvent::Ended => self.controller.handle_track_end(),
            MediaEvent::VolumeChange => self.controller.sync_volume_from_media(),
            MediaEvent::PlayRejected(reason) => self.controller.revert_to_paused(&reason),
        }
    }

    fn on_time_update(&mut self) {
        if self.controller.state().is_buffering {
            self.controller.set_buffering(false);
        }

        let media = self.controller.media();
        let duration = media.duration();
        if duration.is_nan() {
            return;
        }
        let current_time = media.current_time();

        let progress = self.controller.progress_mut();
        progress.current_time = current_time;
        progress.duration = duration.is_finite().then_some(duration);
    }

    fn on_progress(&mut self) {
        let media = self.controller.media();
        let duration = media.duration();
        if !(duration > 0.0) {
            return;
        }
        let Some(end) = covering_buffer_end(&media.buffered(), media.current_time()) else {
            return;
        };

        let progress = self.controller.progress_mut();
        progress.buffered_end = end;
        if duration.is_finite() {
            progress.duration = Some(duration);
        }
    }

    pub fn seek_pointer_down(&mut self, fraction: f64) {
        self.drag = Drag::Seek;
        self.scrub_to(fraction);
    }

    pub fn seek_pointer_move(&mut self, fraction: f64) {
        if self.drag == Drag::Seek {
            self.scrub_to(fraction);
        }
    }

    /// Finish a seek drag. Releasing at the very end finishes the track
    /// instead of leaving a sliver to play; otherwise playback resumes.
    pub fn seek_pointer_up(&mut self, fraction: f64) {
        if self.drag != Drag::Seek {
            return;
        }
        let fraction = self.scrub_to(fraction);
        self.drag = Drag::Idle;
        self.controller.set_scrubbing(false);

        if fraction >= END_SNAP_FRACTION {
            self.controller.handle_track_end();
        } else if self.controller.media().is_paused() {
            self.controller.play();
        }
    }

    pub fn volume_pointer_down(&mut self, fraction: f64) {
        self.drag = Drag::Volume;
        self.controller.set_volume(fraction);
    }

    pub fn volume_pointer_move(&mut self, fraction: f64) {
        if self.drag == Drag::Volume {
            self.controller.set_volume(fraction);
        }
    }

    pub fn volume_pointer_up(&mut self, fraction: f64) {
        if self.drag == Drag::Volume {
            self.controller.set_volume(fraction);
            self.drag = Drag::Idle;
        }
    }

    /// Abandon any drag without applying a final position.
    pub fn pointer_cancel(&mut self) {
        self.drag = Drag::Idle;
        self.controller.set_scrubbing(false);
    }

    /// Wheel over the volume bar. Positive deltas raise the volume.
    pub fn volume_wheel(&mut self, delta_y: f64) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        let volume = self.controller.state().volume + WHEEL_VOLUME_STEP * delta_y.signum();
        self.controller.set_volume(volume);
    }

    /// Click on a playlist entry.
    pub fn select_track(&mut self, index: usize) {
        let _ = self.controller.play_track(index);
    }

    fn scrub_to(&mut self, fraction: f64) -> f64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.controller.set_scrubbing(true);

        let duration = self.controller.media().duration();
        if duration.is_finite() && duration > 0.0 {
            let position = fraction * duration;
            self.controller.media_mut().seek(position);
            let progress = self.controller.progress_mut();
            progress.current_time = position;
            progress.duration = Some(duration);
        }
        fraction
    }
}

/// End of the most recent buffered range that starts at or before
/// `current_time`.
pub fn covering_buffer_end(ranges: &[TimeRange], current_time: f64) -> Option<f64> {
    ranges
        .iter()
        .rev()
        .find(|range| range.start <= current_time)
        .map(|range| range.end)
}

/// Horizontal pointer position as a fraction of a bar, clamped to `[0, 1]`.
pub fn pointer_fraction(client_x: f64, bar_left: f64, bar_width: f64) -> f64 {
    if !(bar_width > 0.0) {
        return 0.0;
    }
    ((client_x - bar_left) / bar_width).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::events::PlayerEvent;
    use crate::player::media::InMemoryMedia;
    use crate::player::testing::{controller, controller_with, events_of};
    use crate::settings::PlayerSettings;
    use approx::assert_relative_eq;

    fn bridge(len: usize) -> EventBridge<InMemoryMedia> {
        let mut bridge = EventBridge::new(controller(len));
        bridge.controller_mut().media_mut().duration = 200.0;
        bridge
    }

    #[test]
    fn buffer_end_uses_range_covering_playhead() {
        let ranges = [
            TimeRange::new(0.0, 30.0),
            TimeRange::new(60.0, 90.0),
            TimeRange::new(120.0, 150.0),
        ];
        assert_eq!(covering_buffer_end(&ranges, 70.0), Some(90.0));
        assert_eq!(covering_buffer_end(&ranges, 10.0), Some(30.0));
        assert_eq!(covering_buffer_end(&ranges, 130.0), Some(150.0));
        assert_eq!(covering_buffer_end(&[TimeRange::new(5.0, 9.0)], 1.0), None);
    }

    #[test]
    fn progress_event_updates_buffered_end() {
        let mut b = bridge(1);
        {
            let media = b.controller_mut().media_mut();
            media.current_time = 65.0;
            media.buffered = vec![TimeRange::new(0.0, 20.0), TimeRange::new(60.0, 100.0)];
        }
        b.handle_media_event(MediaEvent::Progress);
        assert_relative_eq!(b.controller().progress().buffered_end, 100.0);
        assert_relative_eq!(b.controller().progress().buffered_fraction(), 0.5);
    }

    #[test]
    fn time_update_waits_for_duration() {
        let mut b = EventBridge::new(controller(1));
        b.controller_mut().media_mut().current_time = 3.0;
        b.handle_media_event(MediaEvent::TimeUpdate);
        assert_eq!(b.controller().progress().duration, None);
        assert_eq!(b.controller().progress().current_time, 0.0);

        b.controller_mut().media_mut().duration = 120.0;
        b.handle_media_event(MediaEvent::TimeUpdate);
        assert_eq!(b.controller().progress().duration, Some(120.0));
        assert_relative_eq!(b.controller().progress().current_time, 3.0);
    }

    #[test]
    fn waiting_shows_spinner_until_time_moves() {
        let mut b = bridge(1);
        b.handle_media_event(MediaEvent::Waiting);
        assert!(b.controller().state().is_buffering);
        b.handle_media_event(MediaEvent::TimeUpdate);
        assert!(!b.controller().state().is_buffering);
    }

    #[test]
    fn scrubbing_seeks_continuously() {
        let mut b = bridge(1);
        b.seek_pointer_down(0.25);
        assert!(b.controller().state().is_scrubbing);
        assert_relative_eq!(b.controller().media().current_time, 50.0);

        b.seek_pointer_move(0.5);
        assert_relative_eq!(b.controller().media().current_time, 100.0);

        b.seek_pointer_up(0.6);
        assert!(!b.controller().state().is_scrubbing);
        assert_relative_eq!(b.controller().media().current_time, 120.0);
        assert!(b.controller().state().is_playing);
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut b = bridge(1);
        b.seek_pointer_move(0.5);
        b.seek_pointer_up(0.5);
        assert_eq!(b.controller().media().current_time, 0.0);
        assert!(!b.controller().state().is_playing);
    }

    #[test]
    fn ended_during_scrub_is_ignored() {
        let mut b = bridge(3);
        b.seek_pointer_down(1.0);
        b.handle_media_event(MediaEvent::Ended);
        assert_eq!(b.controller().state().current_index, 0);
    }

    #[test]
    fn releasing_at_the_tail_ends_the_track() {
        let mut b = bridge(3);
        b.controller_mut().play();
        b.seek_pointer_down(0.5);
        b.seek_pointer_up(0.995);
        assert_eq!(b.controller().state().current_index, 1);
        assert!(b.controller().state().is_playing);
        assert!(!b.controller().state().is_scrubbing);
    }

    #[test]
    fn releasing_at_the_tail_of_last_track_stops() {
        let mut b = EventBridge::new(controller_with(
            2,
            PlayerSettings {
                loop_at_end: false,
                ..PlayerSettings::default()
            },
        ));
        b.controller_mut().play_track(1).unwrap();
        b.controller_mut().media_mut().duration = 60.0;
        b.controller_mut().take_notifications();

        b.seek_pointer_down(0.99);
        b.seek_pointer_up(0.99);
        assert_eq!(b.controller().state().current_index, 1);
        assert!(!b.controller().state().is_playing);
        assert_eq!(events_of(b.controller_mut()), vec![PlayerEvent::Pause]);
    }

    #[test]
    fn volume_drag_and_wheel() {
        let mut b = bridge(1);
        b.volume_pointer_down(0.4);
        b.volume_pointer_move(1.7);
        assert_relative_eq!(b.controller().state().volume, 1.0);
        b.volume_pointer_up(0.3);
        assert_relative_eq!(b.controller().state().volume, 0.3);

        b.volume_pointer_move(0.9);
        assert_relative_eq!(b.controller().state().volume, 0.3);

        b.volume_wheel(120.0);
        assert_relative_eq!(b.controller().state().volume, 0.32, epsilon = 1e-9);
        b.volume_wheel(-3.0);
        b.volume_wheel(-3.0);
        assert_relative_eq!(b.controller().state().volume, 0.28, epsilon = 1e-9);
        b.volume_wheel(0.0);
        assert_relative_eq!(b.controller().state().volume, 0.28, epsilon = 1e-9);
    }

    #[test]
    fn cancel_clears_scrubbing() {
        let mut b = bridge(1);
        b.seek_pointer_down(0.3);
        b.pointer_cancel();
        assert!(!b.controller().state().is_scrubbing);
        b.seek_pointer_up(0.9);
        assert_relative_eq!(b.controller().media().current_time, 60.0);
    }

    #[test]
    fn selecting_a_track_plays_it() {
        let mut b = bridge(3);
        b.select_track(2);
        assert_eq!(b.controller().state().current_index, 2);
        assert!(b.controller().state().is_playing);
        b.select_track(9);
        assert_eq!(b.controller().state().current_index, 2);
    }

    #[test]
    fn pointer_fraction_clamps() {
        assert_relative_eq!(pointer_fraction(150.0, 100.0, 200.0), 0.25);
        assert_eq!(pointer_fraction(50.0, 100.0, 200.0), 0.0);
        assert_eq!(pointer_fraction(500.0, 100.0, 200.0), 1.0);
        assert_eq!(pointer_fraction(500.0, 100.0, 0.0), 0.0);
    }
}

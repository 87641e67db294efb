use super::controller::PlaybackController;
use super::media::MediaCapability;
use crate::playlist::Track;

/// Everything the widget shows, derived from controller state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerView {
    pub is_playing: bool,
    pub is_muted: bool,
    pub show_spinner: bool,
    pub timer: String,
    pub playhead_width: String,
    pub buffer_width: String,
    pub volume_width: String,
    /// Rendered list position of the highlighted entry.
    pub active_position: Option<usize>,
    pub now_playing: Option<String>,
    pub artwork: Option<String>,
}

impl PlayerView {
    pub fn render<M: MediaCapability>(controller: &PlaybackController<M>) -> Self {
        let state = controller.state();
        let progress = controller.progress();
        let track = controller.current_track();

        Self {
            is_playing: state.is_playing,
            is_muted: state.is_muted,
            show_spinner: state.is_buffering,
            timer: format!(
                "{} / {}",
                format_clock(progress.current_time),
                format_clock(progress.duration.unwrap_or(0.0))
            ),
            playhead_width: percent_width(progress.played_fraction()),
            buffer_width: percent_width(progress.buffered_fraction()),
            volume_width: percent_width(state.volume),
            active_position: track.map(|t| t.position),
            now_playing: track.map(Track::label),
            artwork: track.and_then(|t| t.artwork.clone()),
        }
    }

    pub fn play_icon(&self) -> &'static str {
        if self.is_playing {
            "pause"
        } else {
            "play"
        }
    }

    pub fn mute_icon(&self) -> &'static str {
        if self.is_muted {
            "volume-mute"
        } else {
            "volume"
        }
    }
}

/// Seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Fraction as a CSS percentage width.
pub fn percent_width(fraction: f64) -> String {
    let percent = if fraction.is_finite() {
        (fraction.clamp(0.0, 1.0) * 10_000.0).round() / 100.0
    } else {
        0.0
    };
    format!("{percent}%")
}

/// Page title while a track is playing.
pub fn now_playing_title(track: &Track) -> String {
    format!("\u{266B}  {}", track.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::testing::controller;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(9.7), "00:09");
        assert_eq!(format_clock(75.0), "01:15");
        assert_eq!(format_clock(3_725.0), "62:05");
        assert_eq!(format_clock(f64::NAN), "00:00");
    }

    #[test]
    fn widths_are_percentages() {
        assert_eq!(percent_width(0.5), "50%");
        assert_eq!(percent_width(1.0 / 3.0), "33.33%");
        assert_eq!(percent_width(2.0), "100%");
        assert_eq!(percent_width(f64::INFINITY), "0%");
    }

    #[test]
    fn initial_view() {
        let c = controller(2);
        let view = PlayerView::render(&c);
        assert!(!view.is_playing);
        assert_eq!(view.play_icon(), "play");
        assert_eq!(view.timer, "00:00 / 00:00");
        assert_eq!(view.volume_width, "75%");
        assert_eq!(view.active_position, Some(0));
        assert_eq!(view.now_playing.as_deref(), Some("Artist - Track 0"));
    }

    #[test]
    fn exactly_the_loaded_track_is_active() {
        let mut c = controller(4);
        for index in [3, 1, 2] {
            c.load_track(index).unwrap();
            let view = PlayerView::render(&c);
            let positions: Vec<usize> = c
                .playlist()
                .entries()
                .iter()
                .filter(|entry| Some(entry.position) == view.active_position)
                .map(|entry| entry.position)
                .collect();
            assert_eq!(positions, vec![index]);
        }
    }

    #[test]
    fn progress_is_reflected() {
        let mut c = controller(1);
        c.play();
        c.mute();
        {
            let progress = c.progress_mut();
            progress.current_time = 30.0;
            progress.duration = Some(120.0);
            progress.buffered_end = 60.0;
        }
        let view = PlayerView::render(&c);
        assert_eq!(view.timer, "00:30 / 02:00");
        assert_eq!(view.playhead_width, "25%");
        assert_eq!(view.buffer_width, "50%");
        assert_eq!(view.play_icon(), "pause");
        assert_eq!(view.mute_icon(), "volume-mute");
    }

    #[test]
    fn page_title_uses_label() {
        let c = controller(1);
        assert_eq!(
            now_playing_title(c.current_track().unwrap()),
            "\u{266B}  Artist - Track 0"
        );
    }
}

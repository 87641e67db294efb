/// Keyboard actions available while a widget has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
    Next,
    Previous,
    ToggleMute,
}

/// A key press, reduced to what shortcut matching needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub code: &'a str,
    pub ctrl_or_meta: bool,
    pub alt: bool,
    pub shift: bool,
    pub composing: bool,
}

pub fn shortcut_for(press: &KeyPress<'_>) -> Option<Shortcut> {
    if press.composing {
        return None;
    }
    let KeyPress { key, code, .. } = *press;

    if matches!(
        key,
        "MediaTrackNext" | "MediaNextTrack" | "AudioTrackNext" | "NextTrack"
    ) || code == "MediaTrackNext"
    {
        return Some(Shortcut::Next);
    }
    if matches!(
        key,
        "MediaTrackPrevious" | "MediaPreviousTrack" | "AudioTrackPrevious" | "PreviousTrack"
    ) || code == "MediaTrackPrevious"
    {
        return Some(Shortcut::Previous);
    }
    if key == "MediaPlayPause" || code == "MediaPlayPause" {
        return Some(Shortcut::TogglePlay);
    }

    if press.ctrl_or_meta && !press.alt && !press.shift {
        return match key {
            "ArrowRight" => Some(Shortcut::Next),
            "ArrowLeft" => Some(Shortcut::Previous),
            _ => None,
        };
    }
    if press.ctrl_or_meta || press.alt {
        return None;
    }

    if key == " " || key == "Spacebar" || code == "Space" {
        return Some(Shortcut::TogglePlay);
    }
    if key.eq_ignore_ascii_case("m") {
        return Some(Shortcut::ToggleMute);
    }
    None
}

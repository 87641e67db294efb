use crate::components::{Icon, WidgetHandle};
use crate::player::PlayerView;
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::player::pointer_fraction;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// What a controls template gets to render and drive a widget.
#[derive(Props, Clone, PartialEq)]
pub struct ControlsProps {
    pub handle: WidgetHandle,
    pub view: PlayerView,
}

/// Render function for a widget's controls. Templates are called from the
/// widget's own render, so they compose components rather than own hooks.
pub type ControlsTemplate = fn(ControlsProps) -> Element;

/// Stock controls: header with transport, timer and volume, then the timeline.
#[allow(non_snake_case)]
pub fn DefaultControls(props: ControlsProps) -> Element {
    let ControlsProps { handle, view } = props;
    let title = view.now_playing.clone().unwrap_or_default();

    rsx! {
        div { class: "player-header",
            Artwork { artwork: view.artwork.clone() }
            div { class: "player-controls",
                PlayPauseButton { handle: handle.clone(), icon: view.play_icon() }
                PrevButton { handle: handle.clone() }
                NextButton { handle: handle.clone() }
                span { class: "player-timer", "{view.timer}" }
                MuteButton { handle: handle.clone(), icon: view.mute_icon() }
                VolumeBar { handle: handle.clone(), level: view.volume_width.clone() }
                if view.show_spinner {
                    span { class: "player-spinner",
                        Icon {
                            name: "loader".to_string(),
                            class: "player-icon".to_string(),
                        }
                    }
                }
            }
            if !title.is_empty() {
                div { class: "player-title", "{title}" }
            }
        }
        Timeline {
            handle,
            playhead: view.playhead_width.clone(),
            buffered: view.buffer_width.clone(),
        }
    }
}

#[component]
pub fn PlayPauseButton(handle: WidgetHandle, icon: &'static str) -> Element {
    rsx! {
        button {
            class: "player-button player-play",
            r#type: "button",
            aria_label: "Play or pause",
            onclick: move |_| handle.toggle_playback(),
            Icon { name: icon.to_string(), class: "player-icon".to_string() }
        }
    }
}

#[component]
pub fn PrevButton(handle: WidgetHandle) -> Element {
    rsx! {
        button {
            class: "player-button player-prev",
            r#type: "button",
            aria_label: "Previous track",
            onclick: move |_| {
                if let Err(err) = handle.play_prev() {
                    tracing::debug!("previous ignored: {err}");
                }
            },
            Icon { name: "prev".to_string(), class: "player-icon".to_string() }
        }
    }
}

#[component]
pub fn NextButton(handle: WidgetHandle) -> Element {
    rsx! {
        button {
            class: "player-button player-next",
            r#type: "button",
            aria_label: "Next track",
            onclick: move |_| {
                if let Err(err) = handle.play_next() {
                    tracing::debug!("next ignored: {err}");
                }
            },
            Icon { name: "next".to_string(), class: "player-icon".to_string() }
        }
    }
}

#[component]
pub fn MuteButton(handle: WidgetHandle, icon: &'static str) -> Element {
    rsx! {
        button {
            class: "player-button player-mute",
            r#type: "button",
            aria_label: "Mute or unmute",
            onclick: move |_| handle.toggle_mute(),
            Icon { name: icon.to_string(), class: "player-icon".to_string() }
        }
    }
}

#[component]
pub fn Artwork(artwork: Option<String>) -> Element {
    match artwork {
        Some(src) => rsx! {
            img { class: "player-artwork", src: "{src}", alt: "" }
        },
        None => rsx! {
            div { class: "player-artwork player-artwork-empty",
                Icon { name: "music".to_string(), class: "player-icon".to_string() }
            }
        },
    }
}

/// Volume bar: press or drag to set, scroll to nudge.
#[component]
pub fn VolumeBar(handle: WidgetHandle, level: String) -> Element {
    let down = handle.clone();
    let moved = handle.clone();
    let up = handle.clone();
    let cancel = handle.clone();
    let wheel = handle;

    rsx! {
        div {
            class: "player-volume",
            "data-bar": "volume",
            onpointerdown: move |evt: Event<PointerData>| {
                if let Some(fraction) = bar_fraction(&evt, true) {
                    down.dispatch(|bridge| bridge.volume_pointer_down(fraction));
                }
            },
            onpointermove: move |evt: Event<PointerData>| {
                if let Some(fraction) = bar_fraction(&evt, false) {
                    moved.dispatch(|bridge| bridge.volume_pointer_move(fraction));
                }
            },
            onpointerup: move |evt: Event<PointerData>| {
                if let Some(fraction) = bar_fraction(&evt, false) {
                    up.dispatch(|bridge| bridge.volume_pointer_up(fraction));
                }
            },
            onpointercancel: move |_| {
                cancel.dispatch(|bridge| bridge.pointer_cancel());
            },
            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let delta_y = evt.data().delta().strip_units().y;
                wheel.dispatch(|bridge| bridge.volume_wheel(delta_y));
            },
            div { class: "player-volume-back" }
            div { class: "player-volume-level", style: "width: {level}" }
            div { class: "player-volume-knob", style: "left: {level}" }
        }
    }
}

/// Seek timeline with buffer and playhead bars.
#[component]
pub fn Timeline(handle: WidgetHandle, playhead: String, buffered: String) -> Element {
    let down = handle.clone();
    let moved = handle.clone();
    let up = handle.clone();
    let cancel = handle;

    rsx! {
        div {
            class: "player-timeline",
            "data-bar": "seek",
            onpointerdown: move |evt: Event<PointerData>| {
                if let Some(fraction) = bar_fraction(&evt, true) {
                    down.dispatch(|bridge| bridge.seek_pointer_down(fraction));
                }
            },
            onpointermove: move |evt: Event<PointerData>| {
                if let Some(fraction) = bar_fraction(&evt, false) {
                    moved.dispatch(|bridge| bridge.seek_pointer_move(fraction));
                }
            },
            onpointerup: move |evt: Event<PointerData>| {
                if let Some(fraction) = bar_fraction(&evt, false) {
                    up.dispatch(|bridge| bridge.seek_pointer_up(fraction));
                }
            },
            onpointercancel: move |_| {
                cancel.dispatch(|bridge| bridge.pointer_cancel());
            },
            div { class: "player-timeline-back" }
            div { class: "player-timeline-buffer", style: "width: {buffered}" }
            div { class: "player-timeline-playhead", style: "width: {playhead}" }
        }
    }
}

/// Pointer position as a fraction of the enclosing `[data-bar]`. A press
/// must be the primary button and captures the pointer, so a drag keeps
/// reporting after it leaves the bar.
#[cfg(target_arch = "wasm32")]
fn bar_fraction(evt: &Event<PointerData>, press: bool) -> Option<f64> {
    let event = evt.data().as_web_event();
    if press && event.button() != 0 {
        return None;
    }
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let bar = target.closest("[data-bar]").ok()??;
    if press {
        let _ = bar.set_pointer_capture(event.pointer_id());
    }
    let rect = bar.get_bounding_client_rect();
    Some(pointer_fraction(
        f64::from(event.client_x()),
        rect.left(),
        rect.width(),
    ))
}

// Bar geometry is only known in the browser.
#[cfg(not(target_arch = "wasm32"))]
fn bar_fraction(_evt: &Event<PointerData>, _press: bool) -> Option<f64> {
    None
}

use crate::components::{create_backend, PlayerGroup, WidgetHandle};
use crate::markup::HostMarkup;
use crate::player::{shortcut_for, KeyPress, PlayerHandle, PlayerView, Shortcut};
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::components::{announce_events, listen_for_commands, sync_page_title};

mod controls;
mod playlist_view;

pub use controls::{ControlsProps, ControlsTemplate, DefaultControls};
use playlist_view::PlaylistView;

/// One widget for one scanned host container. It renders inside that
/// container, which keeps `host.id` and receives the widget's events.
#[component]
pub fn SpectrumPlayer(
    host: HostMarkup,
    #[props(default)] original_title: String,
    template: Option<ControlsTemplate>,
) -> Element {
    let group = try_use_context::<PlayerGroup>();
    let handle = use_hook(|| {
        let Some(media) = create_backend(&host.audio_id()) else {
            tracing::warn!("no audio element for {}; widget disabled", host.id);
            return None;
        };
        let group = group.as_ref().map(|group| &group.0);
        Some(PlayerHandle::new(
            media,
            host.playlist(),
            host.settings(),
            group,
        ))
    });

    match handle {
        Some(handle) => rsx! {
            PlayerWidget {
                handle,
                root_id: host.id.clone(),
                original_title,
                template,
            }
        },
        None => rsx! {
            div { class: "player-unavailable", "Audio playback is not available." }
        },
    }
}

#[component]
fn PlayerWidget(
    handle: WidgetHandle,
    root_id: String,
    original_title: String,
    template: Option<ControlsTemplate>,
) -> Element {
    let mut view = use_signal(|| handle.view().unwrap_or_default());
    let entries = use_hook(|| {
        handle
            .inspect(|bridge| bridge.controller().playlist().entries().to_vec())
            .unwrap_or_default()
    });

    // Wire the player to the renderer and the host page once mounted.
    {
        let handle = handle.clone();
        let root_id = root_id.clone();
        let original_title = original_title.clone();
        use_effect(move || {
            let runtime = Runtime::current();
            handle.observe(Box::new(move |next: &PlayerView| {
                let _guard = RuntimeGuard::new(runtime.clone());
                view.set(next.clone());
            }));

            #[cfg(target_arch = "wasm32")]
            {
                announce_events(&handle, &root_id);
                sync_page_title(&handle, original_title.clone());
                listen_for_commands(handle.clone(), &root_id);
            }
            #[cfg(not(target_arch = "wasm32"))]
            let _ = (&root_id, &original_title);
        });
    }

    let onkeydown = {
        let handle = handle.clone();
        move |evt: Event<KeyboardData>| {
            let key = evt.key().to_string();
            let code = evt.code().to_string();
            let modifiers = evt.modifiers();
            let press = KeyPress {
                key: &key,
                code: &code,
                ctrl_or_meta: modifiers.contains(Modifiers::CONTROL)
                    || modifiers.contains(Modifiers::META),
                alt: modifiers.contains(Modifiers::ALT),
                shift: modifiers.contains(Modifiers::SHIFT),
                composing: evt.is_composing(),
            };
            let Some(shortcut) = shortcut_for(&press) else {
                return;
            };
            evt.prevent_default();

            let skipped = match shortcut {
                Shortcut::TogglePlay => {
                    handle.toggle_playback();
                    Ok(())
                }
                Shortcut::ToggleMute => {
                    handle.toggle_mute();
                    Ok(())
                }
                Shortcut::Next => handle.play_next(),
                Shortcut::Previous => handle.play_prev(),
            };
            if let Err(err) = skipped {
                tracing::debug!("shortcut ignored: {err}");
            }
        }
    };

    let current = view();
    let props = ControlsProps {
        handle: handle.clone(),
        view: current.clone(),
    };
    let controls = match template {
        Some(template) => template(props),
        None => DefaultControls(props),
    };

    rsx! {
        div {
            class: "player-widget",
            tabindex: "0",
            onkeydown,
            {controls}
            PlaylistView {
                handle: handle.clone(),
                entries: entries.clone(),
                active: current.active_position,
            }
        }
    }
}

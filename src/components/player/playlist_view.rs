use crate::components::WidgetHandle;
use crate::playlist::{EntryStatus, PlaylistEntry};
use dioxus::prelude::*;

#[component]
pub fn PlaylistView(
    handle: WidgetHandle,
    entries: Vec<PlaylistEntry>,
    active: Option<usize>,
) -> Element {
    rsx! {
        div { class: "player-body",
            ol {
                for entry in entries {
                    PlaylistItem {
                        key: "{entry.position}",
                        handle: handle.clone(),
                        active: active == Some(entry.position),
                        entry: entry.clone(),
                    }
                }
            }
        }
    }
}

#[component]
fn PlaylistItem(handle: WidgetHandle, entry: PlaylistEntry, active: bool) -> Element {
    let class = match (&entry.status, active) {
        (EntryStatus::Invalid(_), _) => "invalid",
        (EntryStatus::Playable(_), true) => "active",
        (EntryStatus::Playable(_), false) => "",
    };
    let hint = match &entry.status {
        EntryStatus::Invalid(err) => err.to_string(),
        EntryStatus::Playable(_) => entry.label.clone(),
    };
    let track_index = entry.track_index();

    rsx! {
        li { class,
            a {
                href: "#",
                class,
                title: "{hint}",
                onclick: move |evt: Event<MouseData>| {
                    evt.prevent_default();
                    if let Some(index) = track_index {
                        handle.dispatch(|bridge| bridge.select_track(index));
                    }
                },
                "{entry.label}"
            }
        }
    }
}

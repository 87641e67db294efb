//! Host page markup: the `.spectrum-player` containers present at startup.

use crate::playlist::{Playlist, RawEntry};
use crate::settings::{HostAttributes, PlayerSettings};

#[cfg(target_arch = "wasm32")]
use crate::settings::KNOWN_ATTRIBUTES;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, Element, HtmlElement};

pub const CONTAINER_SELECTOR: &str = ".spectrum-player";
pub const ENTRY_SELECTOR: &str = ".player-body ol li a";

/// One host container, copied out of the DOM.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostMarkup {
    pub id: String,
    pub attributes: HostAttributes,
    pub entries: Vec<RawEntry>,
}

impl HostMarkup {
    pub fn settings(&self) -> PlayerSettings {
        PlayerSettings::from_attributes(&self.attributes)
    }

    pub fn playlist(&self) -> Playlist {
        Playlist::parse(self.entries.clone())
    }

    /// Id of the `<audio>` element backing this widget.
    pub fn audio_id(&self) -> String {
        format!("{}-audio", self.id)
    }
}

pub fn generated_id(ordinal: usize) -> String {
    format!("spectrum-player-{ordinal}")
}

/// A host container left in place for its widget to mount into.
#[cfg(target_arch = "wasm32")]
pub struct HostContainer {
    pub markup: HostMarkup,
    pub element: Element,
}

/// Everything read from the page before the widgets take over.
#[cfg(target_arch = "wasm32")]
pub struct HostPage {
    pub original_title: String,
    pub containers: Vec<HostContainer>,
}

/// Read every host container and empty it. The container element itself
/// stays where the host put it, keeping its id, so host scripts holding a
/// reference to it still see the widget's events.
#[cfg(target_arch = "wasm32")]
pub fn scan_document() -> HostPage {
    let Some(document) = window().and_then(|w| w.document()) else {
        return HostPage {
            original_title: String::new(),
            containers: Vec::new(),
        };
    };
    let original_title = document.title();

    let mut containers = Vec::new();
    let Ok(found) = document.query_selector_all(CONTAINER_SELECTOR) else {
        return HostPage {
            original_title,
            containers,
        };
    };

    for i in 0..found.length() {
        let Some(container) = found
            .item(i)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };

        let id = match container.id() {
            id if id.trim().is_empty() => {
                let id = generated_id(containers.len());
                container.set_id(&id);
                id
            }
            id => id,
        };
        let dataset = container.dataset();
        let attributes = KNOWN_ATTRIBUTES
            .iter()
            .filter_map(|name| dataset.get(name).map(|value| (name.to_string(), value)))
            .collect();
        let entries = read_entries(&container);

        // The widget renders the playlist again from `entries`.
        container.set_inner_html("");
        containers.push(HostContainer {
            markup: HostMarkup {
                id,
                attributes,
                entries,
            },
            element: container.into(),
        });
    }

    tracing::info!(count = containers.len(), "found spectrum players");
    HostPage {
        original_title,
        containers,
    }
}

#[cfg(target_arch = "wasm32")]
fn read_entries(container: &Element) -> Vec<RawEntry> {
    let Ok(anchors) = container.query_selector_all(ENTRY_SELECTOR) else {
        return Vec::new();
    };
    (0..anchors.length())
        .filter_map(|i| anchors.item(i)?.dyn_into::<Element>().ok())
        .map(|anchor| RawEntry {
            title: anchor.get_attribute("data-title"),
            artist: anchor.get_attribute("data-artist"),
            src: anchor.get_attribute("data-src"),
            img: anchor.get_attribute("data-img"),
        })
        .collect()
}

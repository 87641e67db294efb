//! Audio Manager - binds each widget to its own `<audio>` element and relays
//! player notifications to the host page outside of the render cycle.

use crate::player::PlayerHandle;

#[cfg(target_arch = "wasm32")]
use crate::error::{PlayerError, Result};
#[cfg(target_arch = "wasm32")]
use crate::player::{
    now_playing_title, HostCommand, MediaCapability, MediaEvent, MediaEventHandler,
    MediaEventSource, PlayerEvent, TimeRange,
};
#[cfg(not(target_arch = "wasm32"))]
use crate::player::InMemoryMedia;
#[cfg(target_arch = "wasm32")]
use crate::playlist::Track;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::JsFuture;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, CustomEvent, CustomEventInit, HtmlAudioElement};

/// Media capability the widgets run on for this target.
#[cfg(target_arch = "wasm32")]
pub type Backend = HtmlMediaBackend;
#[cfg(not(target_arch = "wasm32"))]
pub type Backend = InMemoryMedia;

pub type WidgetHandle = PlayerHandle<Backend>;

#[cfg(target_arch = "wasm32")]
pub fn create_backend(audio_id: &str) -> Option<Backend> {
    get_or_create_audio_element(audio_id).map(HtmlMediaBackend::attach)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn create_backend(_audio_id: &str) -> Option<Backend> {
    Some(InMemoryMedia::new())
}

// Browser media backend over a hidden `<audio>` element.
include!("html_media_backend.rs");
// Host page integration: DOM events, commands and the page title.
include!("host_bridge.rs");

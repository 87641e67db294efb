// Widgets only mount in the browser; host builds exist to run the tests.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod components;
mod error;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod markup;
mod player;
mod playlist;
mod settings;

fn main() {
    dioxus::logger::initialize_default();

    // Each widget renders inside the container the host page put it in.
    #[cfg(target_arch = "wasm32")]
    components::mount_widgets(markup::scan_document());

    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("spectrum players mount into a browser page; nothing to do here");
}

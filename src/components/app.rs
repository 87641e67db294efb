use crate::components::SpectrumPlayer;
use crate::markup::HostMarkup;
use crate::player::ConnectedGroup;
use dioxus::prelude::*;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use crate::markup::HostPage;

const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

/// Players with `connected` set share this group; starting one pauses the rest.
#[derive(Clone)]
pub struct PlayerGroup(pub Rc<ConnectedGroup>);

/// Root context of one widget's renderer.
#[derive(Clone)]
pub struct WidgetMount {
    pub host: HostMarkup,
    pub original_title: String,
    pub group: PlayerGroup,
    /// Only the first widget on the page links the stylesheet.
    pub stylesheet: bool,
}

/// Start one renderer per host container, each rooted in its own container.
/// The renderers share a single [`ConnectedGroup`].
#[cfg(target_arch = "wasm32")]
pub fn mount_widgets(page: HostPage) {
    if page.containers.is_empty() {
        tracing::info!("no .spectrum-player containers on this page");
        return;
    }

    let group = PlayerGroup(ConnectedGroup::new());
    for (ordinal, container) in page.containers.into_iter().enumerate() {
        let mount = WidgetMount {
            host: container.markup,
            original_title: page.original_title.clone(),
            group: group.clone(),
            stylesheet: ordinal == 0,
        };
        let dom = VirtualDom::new(WidgetRoot).with_root_context(mount);
        let config = dioxus::web::Config::new().rootelement(container.element);
        dioxus::web::launch::launch_virtual_dom(dom, config);
    }
}

#[component]
pub fn WidgetRoot() -> Element {
    let Some(mount) = try_use_context::<WidgetMount>() else {
        tracing::warn!("widget renderer started without a host container");
        return rsx! {};
    };
    use_context_provider(|| mount.group.clone());

    rsx! {
        if mount.stylesheet {
            document::Stylesheet { href: PLAYER_CSS }
        }
        SpectrumPlayer {
            host: mount.host.clone(),
            original_title: mount.original_title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::RawEntry;

    fn mount(id: &str, group: &PlayerGroup) -> WidgetMount {
        WidgetMount {
            host: HostMarkup {
                id: id.to_string(),
                attributes: Default::default(),
                entries: vec![RawEntry {
                    title: Some(id.to_string()),
                    src: Some(format!("{id}.mp3")),
                    ..RawEntry::default()
                }],
            },
            original_title: "Listening room".to_string(),
            group: group.clone(),
            stylesheet: false,
        }
    }

    #[test]
    fn separate_renderers_share_one_group() {
        let group = PlayerGroup(ConnectedGroup::new());
        let mut first = VirtualDom::new(WidgetRoot).with_root_context(mount("first", &group));
        let mut second = VirtualDom::new(WidgetRoot).with_root_context(mount("second", &group));
        first.rebuild_in_place();
        second.rebuild_in_place();

        assert_eq!(group.0.len(), 2);

        drop(first);
        assert_eq!(group.0.len(), 1);
    }

    #[test]
    fn renderer_without_a_container_renders_nothing() {
        let mut dom = VirtualDom::new(WidgetRoot);
        dom.rebuild_in_place();
    }
}

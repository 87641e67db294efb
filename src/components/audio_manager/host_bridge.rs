/// DOM event a host dispatches on a host container to control it.
pub const COMMAND_EVENT: &str = "spectrum-command";

/// Re-dispatch every player notification as a bubbling `CustomEvent` on
/// the host container, with the track descriptor as `detail`.
#[cfg(target_arch = "wasm32")]
pub fn announce_events(handle: &WidgetHandle, root_id: &str) {
    for event in PlayerEvent::ALL {
        let root_id = root_id.to_string();
        let name = event.name();
        handle.on(
            name,
            Rc::new(move |track: &Track| dispatch_host_event(&root_id, name, track)),
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn dispatch_host_event(root_id: &str, name: &str, track: &Track) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(root_id))
    else {
        return;
    };

    let detail = serde_json::to_string(track)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL);
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);

    match CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            let _ = root.dispatch_event(&event);
        }
        Err(err) => tracing::warn!("could not create `{name}` event: {err:?}"),
    }
}

/// Accept [`HostCommand`]s sent as `spectrum-command` events on the host
/// container. `detail` may be a JSON string or a plain object.
#[cfg(target_arch = "wasm32")]
pub fn listen_for_commands(handle: WidgetHandle, root_id: &str) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(root_id))
    else {
        tracing::warn!("host container {root_id} missing; host commands disabled");
        return;
    };

    let callback = Closure::wrap(Box::new(move |event: CustomEvent| {
        let detail = event.detail();
        let json = detail.as_string().or_else(|| {
            js_sys::JSON::stringify(&detail)
                .ok()
                .and_then(|json| json.as_string())
        });
        let applied = json
            .ok_or_else(|| PlayerError::InvalidCommand("missing detail".to_string()))
            .and_then(|json| HostCommand::parse(&json))
            .and_then(|command| handle.apply(command));
        if let Err(err) = applied {
            tracing::warn!("host command ignored: {err}");
        }
    }) as Box<dyn FnMut(CustomEvent)>);

    let _ = root.add_event_listener_with_callback(COMMAND_EVENT, callback.as_ref().unchecked_ref());
    callback.forget();
}

/// Show the playing track in the page title and restore the original title
/// on pause.
#[cfg(target_arch = "wasm32")]
pub fn sync_page_title(handle: &WidgetHandle, original_title: String) {
    handle.on(
        PlayerEvent::Play.name(),
        Rc::new(|track: &Track| set_document_title(&now_playing_title(track))),
    );
    handle.on(
        PlayerEvent::Pause.name(),
        Rc::new(move |_: &Track| set_document_title(&original_title)),
    );
}

#[cfg(target_arch = "wasm32")]
fn set_document_title(title: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

// Media events forwarded from the element to the player.
#[cfg(target_arch = "wasm32")]
const FORWARDED_MEDIA_EVENTS: [(&str, MediaEvent); 5] = [
    ("timeupdate", MediaEvent::TimeUpdate),
    ("progress", MediaEvent::Progress),
    ("waiting", MediaEvent::Waiting),
    ("ended", MediaEvent::Ended),
    ("volumechange", MediaEvent::VolumeChange),
];

/// Find the widget's audio element, creating it on first use.
#[cfg(target_arch = "wasm32")]
pub fn get_or_create_audio_element(id: &str) -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(id) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(id);
    // Nothing is fetched until the listener asks for it.
    audio.set_attribute("preload", "none").ok()?;

    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
pub struct HtmlMediaBackend {
    audio: HtmlAudioElement,
    events: MediaEventSource,
}

#[cfg(target_arch = "wasm32")]
impl HtmlMediaBackend {
    pub fn attach(audio: HtmlAudioElement) -> Self {
        let events = MediaEventSource::default();
        for (name, event) in FORWARDED_MEDIA_EVENTS {
            let source = events.clone();
            let callback =
                Closure::wrap(Box::new(move || source.fire(event.clone())) as Box<dyn FnMut()>);
            if audio
                .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
                .is_err()
            {
                tracing::warn!("could not listen for `{name}` on {}", audio.id());
            }
            callback.forget();
        }
        Self { audio, events }
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaCapability for HtmlMediaBackend {
    fn load(&mut self, source: &str) {
        self.audio.set_src(source);
        self.audio.load();
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .audio
            .play()
            .map_err(|err| PlayerError::PlaybackRejected(js_error_text(&err)))?;
        let events = self.events.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let Err(err) = JsFuture::from(promise).await else {
                return;
            };
            // Interrupted by a later load or pause.
            if js_error_name(&err).as_deref() == Some("AbortError") {
                return;
            }
            let reason = js_error_text(&err);
            tracing::warn!("playback rejected: {reason}");
            events.fire(MediaEvent::PlayRejected(reason));
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            tracing::warn!("pause failed: {}", js_error_text(&err));
        }
    }

    fn seek(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
    }

    fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn volume(&self) -> f64 {
        self.audio.volume()
    }

    fn is_muted(&self) -> bool {
        self.audio.muted()
    }

    fn is_paused(&self) -> bool {
        self.audio.paused()
    }

    fn buffered(&self) -> Vec<TimeRange> {
        let ranges = self.audio.buffered();
        (0..ranges.length())
            .filter_map(|i| Some(TimeRange::new(ranges.start(i).ok()?, ranges.end(i).ok()?)))
            .collect()
    }

    fn on_event(&mut self, handler: MediaEventHandler) {
        self.events.subscribe(handler);
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error_name(err: &JsValue) -> Option<String> {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()?
        .as_string()
}

#[cfg(target_arch = "wasm32")]
fn js_error_text(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

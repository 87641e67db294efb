use super::controller::PlaybackController;
use super::events::PlayerEvent;
use super::media::InMemoryMedia;
use crate::playlist::{Playlist, RawEntry};
use crate::settings::PlayerSettings;

pub fn playlist(len: usize) -> Playlist {
    Playlist::parse(
        (0..len)
            .map(|i| RawEntry {
                title: Some(format!("Track {i}")),
                artist: Some("Artist".to_string()),
                src: Some(format!("track-{i}.mp3")),
                img: None,
            })
            .collect(),
    )
}

pub fn controller(len: usize) -> PlaybackController<InMemoryMedia> {
    controller_with(len, PlayerSettings::default())
}

pub fn controller_with(len: usize, settings: PlayerSettings) -> PlaybackController<InMemoryMedia> {
    PlaybackController::new(InMemoryMedia::new(), playlist(len), settings)
}

pub fn events_of(controller: &mut PlaybackController<InMemoryMedia>) -> Vec<PlayerEvent> {
    controller
        .take_notifications()
        .into_iter()
        .map(|n| n.event)
        .collect()
}

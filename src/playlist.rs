use crate::error::{PlayerError, Result};
use serde::Serialize;

/// A playlist entry as found in host markup, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub src: Option<String>,
    pub img: Option<String>,
}

/// A playable track. This is also the descriptor handed to event handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    /// Position in the playable track list.
    pub index: usize,
    pub title: String,
    pub artist: Option<String>,
    #[serde(rename = "src")]
    pub source: String,
    #[serde(rename = "img")]
    pub artwork: Option<String>,
    /// Position of the rendered list item this track came from.
    #[serde(skip)]
    pub position: usize,
}

impl Track {
    /// Display label, `artist - title` when an artist is known.
    pub fn label(&self) -> String {
        entry_label(self.artist.as_deref(), Some(&self.title))
    }
}

/// Validation result for one rendered list item.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryStatus {
    /// Maps to `Playlist::get(index)`.
    Playable(usize),
    Invalid(PlayerError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub position: usize,
    pub label: String,
    pub status: EntryStatus,
}

impl PlaylistEntry {
    pub fn track_index(&self) -> Option<usize> {
        match self.status {
            EntryStatus::Playable(index) => Some(index),
            EntryStatus::Invalid(_) => None,
        }
    }
}

/// Ordered, immutable list of tracks parsed from host markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    tracks: Vec<Track>,
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    /// Build a playlist, skipping entries without a title or source. Skipped
    /// entries stay in `entries()` marked invalid.
    pub fn parse(raw: Vec<RawEntry>) -> Self {
        let mut tracks = Vec::with_capacity(raw.len());
        let mut entries = Vec::with_capacity(raw.len());

        for (position, entry) in raw.into_iter().enumerate() {
            let label = entry_label(entry.artist.as_deref(), entry.title.as_deref());
            let status = match validate(position, entry) {
                Ok(mut track) => {
                    track.index = tracks.len();
                    tracks.push(track);
                    EntryStatus::Playable(tracks.len() - 1)
                }
                Err(err) => {
                    tracing::warn!("skipping playlist entry: {err}");
                    EntryStatus::Invalid(err)
                }
            };
            entries.push(PlaylistEntry {
                position,
                label,
                status,
            });
        }

        Self { tracks, entries }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    /// Look up a track, reporting out-of-range indices as errors.
    pub fn track(&self, index: usize) -> Result<&Track> {
        self.tracks.get(index).ok_or(PlayerError::IndexOutOfRange {
            index: index as i64,
            len: self.tracks.len(),
        })
    }

    /// Index after `current`, wrapping to the first track.
    pub fn wrap_next(&self, current: usize) -> Option<usize> {
        let len = self.len();
        (len > 0).then(|| (current + 1) % len)
    }

    /// Index before `current`, wrapping to the last track.
    pub fn wrap_previous(&self, current: usize) -> Option<usize> {
        let len = self.len();
        (len > 0).then(|| (current % len + len - 1) % len)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate(position: usize, entry: RawEntry) -> Result<Track> {
    let title = non_blank(entry.title).ok_or(PlayerError::MissingField {
        position,
        field: "data-title",
    })?;
    let source = non_blank(entry.src).ok_or(PlayerError::MissingField {
        position,
        field: "data-src",
    })?;

    Ok(Track {
        index: 0,
        title,
        artist: non_blank(entry.artist),
        source,
        artwork: non_blank(entry.img),
        position,
    })
}

fn entry_label(artist: Option<&str>, title: Option<&str>) -> String {
    let artist = artist.map(str::trim).filter(|a| !a.is_empty());
    let title = title.map(str::trim).filter(|t| !t.is_empty());
    match (artist, title) {
        (Some(artist), Some(title)) => format!("{artist} - {title}"),
        (None, Some(title)) => title.to_string(),
        (Some(artist), None) => format!("{artist} - (untitled)"),
        (None, None) => "(untitled)".to_string(),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Guestbook record as persisted by every store backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestbookEntry {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

// Raw candidate entry before validation.
#[derive(Clone, Debug, Default)]
pub struct NewGuestbookEntry {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

// Opaque blob content plus the version used for conditional writes.
#[derive(Clone, Debug)]
pub struct BlobObject {
    pub data: Vec<u8>,
    pub version: String,
}

// Watch status of an anime list entry as reported upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

impl WatchStatus {
    // Jikan encodes list status as 1..=6 (5 is unused).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(WatchStatus::Watching),
            2 => Some(WatchStatus::Completed),
            3 => Some(WatchStatus::OnHold),
            4 => Some(WatchStatus::Dropped),
            6 => Some(WatchStatus::PlanToWatch),
            _ => None,
        }
    }
}

// One anime on the user's list.
#[derive(Clone, Debug)]
pub struct AnimeListEntry {
    pub title: String,
    pub image: Option<String>,
    pub status: Option<WatchStatus>,
    pub score: u8,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeStats {
    pub days_watched: f64,
    pub mean_score: f64,
    pub watching: u32,
    pub completed: u32,
    pub on_hold: u32,
    pub dropped: u32,
    pub plan_to_watch: u32,
    pub total_entries: u32,
    pub episodes_watched: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaStats {
    pub days_read: f64,
    pub mean_score: f64,
    pub reading: u32,
    pub completed: u32,
    pub on_hold: u32,
    pub dropped: u32,
    pub plan_to_read: u32,
    pub total_entries: u32,
    pub chapters_read: u32,
    pub volumes_read: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteTitle {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FavoriteCharacter {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Favorites {
    pub anime: Vec<FavoriteTitle>,
    pub manga: Vec<FavoriteTitle>,
    pub characters: Vec<FavoriteCharacter>,
}

// Public MyAnimeList profile with statistics and favorites.
#[derive(Clone, Debug, Default)]
pub struct UserProfile {
    pub username: String,
    pub url: String,
    pub avatar_url: Option<String>,
    pub anime: AnimeStats,
    pub manga: MangaStats,
    pub favorites: Favorites,
}

// Track as reported by the music service.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub album_image_url: Option<String>,
    pub song_url: Option<String>,
}

// Currently-playing state; `track` is absent for ads or nothing queued.
#[derive(Clone, Debug)]
pub struct Playback {
    pub is_playing: bool,
    pub track: Option<Track>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub name: String,
    pub url: String,
    pub image: Option<String>,
    pub genres: Vec<String>,
}

// Window the music service aggregates top artists over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "short_term" => Some(TimeRange::ShortTerm),
            "medium_term" => Some(TimeRange::MediumTerm),
            "long_term" => Some(TimeRange::LongTerm),
            _ => None,
        }
    }
}

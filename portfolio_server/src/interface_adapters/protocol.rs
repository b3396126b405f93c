use serde::{Deserialize, Serialize};

use crate::domain::entities::{AnimeStats, Artist, MangaStats, WatchStatus};
use crate::use_cases::anime_profile::ProfileStats;
use crate::use_cases::anime_showcase::AnimeCard;
use crate::use_cases::now_playing::NowPlaying;

// Request payload for a new guestbook entry. Fields are optional here so
// missing values reach validation instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct CreateEntryRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

// Query string for entry deletion.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteEntryQuery {
    pub id: Option<String>,
    pub secret: Option<String>,
}

// Query string for top artists; values stay strings so range checks answer
// with a JSON 400.
#[derive(Debug, Default, Deserialize)]
pub struct TopArtistsQuery {
    pub time_range: Option<String>,
    pub limit: Option<String>,
}

// JSON error envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnimeCardResponse {
    pub title: String,
    pub image: Option<String>,
    pub status: &'static str,
    pub score: u8,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mal_url: String,
}

impl From<AnimeCard> for AnimeCardResponse {
    fn from(card: AnimeCard) -> Self {
        let status = match card.status {
            WatchStatus::Watching => "Watching",
            _ => "Completed",
        };
        AnimeCardResponse {
            title: card.title,
            image: card.image,
            status,
            score: card.score,
            kind: "Anime",
            mal_url: card.url,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatsResponse {
    pub username: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub anime: AnimeStats,
    pub manga: MangaStats,
}

impl From<ProfileStats> for ProfileStatsResponse {
    fn from(stats: ProfileStats) -> Self {
        ProfileStatsResponse {
            username: stats.username,
            url: stats.url,
            avatar_url: stats.avatar_url,
            anime: stats.anime,
            manga: stats.manga,
        }
    }
}

// Title shown when there is neither a live nor a recent track.
pub const NOTHING_TO_SHOW: &str = "Nothing to show";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlayingResponse {
    pub is_playing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_url: Option<String>,
}

impl From<NowPlaying> for NowPlayingResponse {
    fn from(now: NowPlaying) -> Self {
        match now.track {
            Some(track) => NowPlayingResponse {
                is_playing: now.is_playing,
                title: Some(track.title),
                artist: Some(track.artists.join(", ")),
                album: Some(track.album),
                album_image_url: track.album_image_url,
                song_url: track.song_url,
            },
            None => NowPlayingResponse {
                is_playing: false,
                title: Some(NOTHING_TO_SHOW.to_string()),
                artist: None,
                album: None,
                album_image_url: None,
                song_url: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopArtistResponse {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub genres: Vec<String>,
}

impl From<Artist> for TopArtistResponse {
    fn from(artist: Artist) -> Self {
        TopArtistResponse {
            name: artist.name,
            url: artist.url,
            image: artist.image,
            genres: artist.genres,
        }
    }
}

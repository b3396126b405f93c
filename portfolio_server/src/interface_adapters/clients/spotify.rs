use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use url::Url;

use crate::domain::entities::{Artist, Playback, TimeRange, Track};
use crate::domain::errors::ProxyError;
use crate::domain::ports::MusicProvider;

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

// OAuth client credentials plus the long-lived refresh token.
#[derive(Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for SpotifyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .finish()
    }
}

// Thin reqwest client for the Spotify Web API. Access tokens are exchanged
// per call and never cached.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    token_url: Url,
    api_url: Url,
    credentials: Option<SpotifyCredentials>,
}

impl SpotifyClient {
    pub fn new(
        http: Client,
        token_url: Url,
        api_url: Url,
        credentials: Option<SpotifyCredentials>,
    ) -> Self {
        Self {
            http,
            token_url,
            api_url,
            credentials,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProxyError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::MissingConfiguration("Invalid Spotify API URL."))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, access_token: &str) -> Result<reqwest::Response, ProxyError> {
        self.http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|err| ProxyError::Transport(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
}

#[derive(Debug, Deserialize)]
struct NamedArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Album {
    name: String,
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct TrackDto {
    name: String,
    #[serde(default)]
    artists: Vec<NamedArtist>,
    album: Option<Album>,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct CurrentlyPlayingDto {
    #[serde(default)]
    is_playing: bool,
    item: Option<TrackDto>,
}

#[derive(Debug, Deserialize)]
struct PlayHistoryDto {
    track: TrackDto,
}

#[derive(Debug, Deserialize)]
struct Paged<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ArtistDto {
    name: String,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[serde(default)]
    images: Vec<Image>,
    #[serde(default)]
    genres: Vec<String>,
}

impl From<TrackDto> for Track {
    fn from(dto: TrackDto) -> Self {
        let (album, album_image_url) = match dto.album {
            Some(album) => (album.name, album.images.into_iter().next().map(|i| i.url)),
            None => (String::new(), None),
        };
        Track {
            title: dto.name,
            artists: dto.artists.into_iter().map(|a| a.name).collect(),
            album,
            album_image_url,
            song_url: dto.external_urls.spotify,
        }
    }
}

impl From<ArtistDto> for Artist {
    fn from(dto: ArtistDto) -> Self {
        Artist {
            name: dto.name,
            url: dto.external_urls.spotify.unwrap_or_default(),
            image: dto.images.into_iter().next().map(|i| i.url),
            genres: dto.genres,
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<T, ProxyError> {
    res.json::<T>()
        .await
        .map_err(|err| ProxyError::Decode(err.to_string()))
}

async fn upstream_error(res: reqwest::Response, message: &str) -> ProxyError {
    let status = res.status().as_u16();
    let details = res.text().await.ok().filter(|body| !body.is_empty());
    ProxyError::Upstream {
        status,
        message: message.to_string(),
        details,
    }
}

#[async_trait]
impl MusicProvider for SpotifyClient {
    async fn access_token(&self) -> Result<String, ProxyError> {
        let credentials = self.credentials.as_ref().ok_or(ProxyError::MissingConfiguration(
            "Missing required Spotify environment variables.",
        ))?;

        let res = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "spotify token exchange transport error");
                ProxyError::TokenExchange
            })?;

        let status = res.status();
        let token = res
            .json::<TokenResponse>()
            .await
            .ok()
            .and_then(|body| body.access_token)
            .filter(|token| !token.is_empty());

        match token {
            Some(token) => Ok(token),
            None => {
                tracing::error!(%status, "spotify token exchange returned no access token");
                Err(ProxyError::TokenExchange)
            }
        }
    }

    async fn currently_playing(&self, access_token: &str) -> Result<Option<Playback>, ProxyError> {
        let url = self.endpoint(&["me", "player", "currently-playing"])?;
        let res = self.get(url, access_token).await?;

        match res.status() {
            StatusCode::NO_CONTENT => Ok(None),
            StatusCode::OK => {
                let body: CurrentlyPlayingDto = decode(res).await?;
                Ok(Some(Playback {
                    is_playing: body.is_playing,
                    track: body.item.map(Track::from),
                }))
            }
            _ => Err(upstream_error(res, "Failed to fetch currently playing track.").await),
        }
    }

    async fn recently_played(&self, access_token: &str) -> Result<Option<Track>, ProxyError> {
        let mut url = self.endpoint(&["me", "player", "recently-played"])?;
        url.query_pairs_mut().append_pair("limit", "1");
        let res = self.get(url, access_token).await?;

        if res.status() != StatusCode::OK {
            return Err(upstream_error(res, "Failed to fetch recently played tracks.").await);
        }

        let body: Paged<PlayHistoryDto> = decode(res).await?;
        Ok(body.items.into_iter().next().map(|played| played.track.into()))
    }

    async fn top_artists(
        &self,
        access_token: &str,
        time_range: TimeRange,
        limit: u8,
    ) -> Result<Vec<Artist>, ProxyError> {
        let mut url = self.endpoint(&["me", "top", "artists"])?;
        url.query_pairs_mut()
            .append_pair("time_range", time_range.as_str())
            .append_pair("limit", &limit.to_string());
        let res = self.get(url, access_token).await?;

        if res.status() != StatusCode::OK {
            return Err(upstream_error(res, "Failed to fetch top artists.").await);
        }

        let body: Paged<ArtistDto> = decode(res).await?;
        Ok(body.items.into_iter().map(Artist::from).collect())
    }
}

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::entities::{
    AnimeListEntry, AnimeStats, FavoriteCharacter, FavoriteTitle, Favorites, MangaStats,
    UserProfile, WatchStatus,
};
use crate::domain::errors::ProxyError;
use crate::domain::ports::AnimeProvider;

pub const DEFAULT_API_URL: &str = "https://api.jikan.moe/v4";
// Jikan asks callers to identify themselves.
const CLIENT_USER_AGENT: &str = "Personal-Website-Project/1.0";

// Thin reqwest client for the public Jikan (MyAnimeList) API.
#[derive(Clone)]
pub struct JikanClient {
    http: Client,
    base_url: Url,
    username: Option<String>,
}

impl JikanClient {
    pub fn new(http: Client, base_url: Url, username: Option<String>) -> Self {
        Self {
            http,
            base_url,
            username,
        }
    }

    fn user_url(&self, resource: &str) -> Result<Url, ProxyError> {
        let username = self
            .username
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(ProxyError::MissingConfiguration(
                "Missing required MyAnimeList username.",
            ))?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::MissingConfiguration("Invalid Jikan API URL."))?
            .pop_if_empty()
            .push("users")
            .push(username)
            .push(resource);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProxyError> {
        let res = self
            .http
            .get(url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .map_err(|err| ProxyError::Transport(err.to_string()))?;
        let status = res.status();

        // Keep the upstream status so handlers can pass it through.
        if !status.is_success() {
            let details = res.text().await.ok().filter(|body| !body.is_empty());
            tracing::error!(%status, details = ?details, "jikan api error");
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                message: format!(
                    "Failed to fetch data from Jikan API: {}",
                    status.canonical_reason().unwrap_or("Unknown Status")
                ),
                details: None,
            });
        }

        res.json::<T>()
            .await
            .map_err(|err| ProxyError::Decode(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct ImageSet {
    image_url: Option<String>,
    large_image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Images {
    #[serde(default)]
    jpg: ImageSet,
    #[serde(default)]
    webp: ImageSet,
}

impl Images {
    fn best(self) -> Option<String> {
        self.webp
            .large_image_url
            .or(self.webp.image_url)
            .or(self.jpg.large_image_url)
            .or(self.jpg.image_url)
    }
}

#[derive(Debug, Deserialize)]
struct ListedAnime {
    title: String,
    url: String,
    #[serde(default)]
    images: Images,
}

#[derive(Debug, Deserialize)]
struct ListItem {
    status: Option<u8>,
    score: Option<u8>,
    anime: ListedAnime,
}

#[derive(Debug, Default, Deserialize)]
struct AnimeStatsDto {
    days_watched: Option<f64>,
    mean_score: Option<f64>,
    watching: Option<u32>,
    completed: Option<u32>,
    on_hold: Option<u32>,
    dropped: Option<u32>,
    plan_to_watch: Option<u32>,
    total_entries: Option<u32>,
    episodes_watched: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct MangaStatsDto {
    days_read: Option<f64>,
    mean_score: Option<f64>,
    reading: Option<u32>,
    completed: Option<u32>,
    on_hold: Option<u32>,
    dropped: Option<u32>,
    plan_to_read: Option<u32>,
    total_entries: Option<u32>,
    chapters_read: Option<u32>,
    volumes_read: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct StatisticsDto {
    #[serde(default)]
    anime: AnimeStatsDto,
    #[serde(default)]
    manga: MangaStatsDto,
}

#[derive(Debug, Deserialize)]
struct FavoriteTitleDto {
    title: String,
    url: String,
    #[serde(default)]
    images: Images,
    #[serde(rename = "type")]
    kind: Option<String>,
    start_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct FavoriteCharacterDto {
    name: String,
    url: String,
    #[serde(default)]
    images: Images,
}

#[derive(Debug, Default, Deserialize)]
struct FavoritesDto {
    #[serde(default)]
    anime: Vec<FavoriteTitleDto>,
    #[serde(default)]
    manga: Vec<FavoriteTitleDto>,
    #[serde(default)]
    characters: Vec<FavoriteCharacterDto>,
}

#[derive(Debug, Deserialize)]
struct ProfileDto {
    username: String,
    url: String,
    #[serde(default)]
    images: Images,
    #[serde(default)]
    statistics: StatisticsDto,
    #[serde(default)]
    favorites: FavoritesDto,
}

impl From<ListItem> for AnimeListEntry {
    fn from(item: ListItem) -> Self {
        AnimeListEntry {
            title: item.anime.title,
            image: item.anime.images.best(),
            status: item.status.and_then(WatchStatus::from_code),
            score: item.score.unwrap_or_default(),
            url: item.anime.url,
        }
    }
}

impl From<AnimeStatsDto> for AnimeStats {
    fn from(dto: AnimeStatsDto) -> Self {
        AnimeStats {
            days_watched: dto.days_watched.unwrap_or_default(),
            mean_score: dto.mean_score.unwrap_or_default(),
            watching: dto.watching.unwrap_or_default(),
            completed: dto.completed.unwrap_or_default(),
            on_hold: dto.on_hold.unwrap_or_default(),
            dropped: dto.dropped.unwrap_or_default(),
            plan_to_watch: dto.plan_to_watch.unwrap_or_default(),
            total_entries: dto.total_entries.unwrap_or_default(),
            episodes_watched: dto.episodes_watched.unwrap_or_default(),
        }
    }
}

impl From<MangaStatsDto> for MangaStats {
    fn from(dto: MangaStatsDto) -> Self {
        MangaStats {
            days_read: dto.days_read.unwrap_or_default(),
            mean_score: dto.mean_score.unwrap_or_default(),
            reading: dto.reading.unwrap_or_default(),
            completed: dto.completed.unwrap_or_default(),
            on_hold: dto.on_hold.unwrap_or_default(),
            dropped: dto.dropped.unwrap_or_default(),
            plan_to_read: dto.plan_to_read.unwrap_or_default(),
            total_entries: dto.total_entries.unwrap_or_default(),
            chapters_read: dto.chapters_read.unwrap_or_default(),
            volumes_read: dto.volumes_read.unwrap_or_default(),
        }
    }
}

impl From<FavoriteTitleDto> for FavoriteTitle {
    fn from(dto: FavoriteTitleDto) -> Self {
        FavoriteTitle {
            title: dto.title,
            url: dto.url,
            image: dto.images.best(),
            kind: dto.kind,
            start_year: dto.start_year,
        }
    }
}

impl From<ProfileDto> for UserProfile {
    fn from(dto: ProfileDto) -> Self {
        UserProfile {
            username: dto.username,
            url: dto.url,
            avatar_url: dto.images.best(),
            anime: dto.statistics.anime.into(),
            manga: dto.statistics.manga.into(),
            favorites: Favorites {
                anime: dto.favorites.anime.into_iter().map(Into::into).collect(),
                manga: dto.favorites.manga.into_iter().map(Into::into).collect(),
                characters: dto
                    .favorites
                    .characters
                    .into_iter()
                    .map(|c| FavoriteCharacter {
                        name: c.name,
                        url: c.url,
                        image: c.images.best(),
                    })
                    .collect(),
            },
        }
    }
}

#[async_trait]
impl AnimeProvider for JikanClient {
    async fn anime_list(&self) -> Result<Vec<AnimeListEntry>, ProxyError> {
        let url = self.user_url("animelist")?;
        let envelope: Envelope<Vec<ListItem>> = self.fetch(url).await?;
        Ok(envelope.data.into_iter().map(Into::into).collect())
    }

    async fn profile(&self) -> Result<UserProfile, ProxyError> {
        let url = self.user_url("full")?;
        let envelope: Envelope<ProfileDto> = self.fetch(url).await?;
        Ok(envelope.data.into())
    }
}

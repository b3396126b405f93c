use crate::domain::entities::{AnimeStats, Favorites, MangaStats};
use crate::domain::errors::ProxyError;
use crate::domain::ports::AnimeProvider;

#[derive(Debug, PartialEq)]
pub struct ProfileStats {
    pub username: String,
    pub url: String,
    pub avatar_url: Option<String>,
    pub anime: AnimeStats,
    pub manga: MangaStats,
}

pub struct ProfileStatsUseCase<A> {
    pub anime: A,
}

impl<A> ProfileStatsUseCase<A>
where
    A: AnimeProvider,
{
    pub async fn execute(&self) -> Result<ProfileStats, ProxyError> {
        let profile = self.anime.profile().await?;
        Ok(ProfileStats {
            username: profile.username,
            url: profile.url,
            avatar_url: profile.avatar_url,
            anime: profile.anime,
            manga: profile.manga,
        })
    }
}

pub struct FavoritesUseCase<A> {
    pub anime: A,
}

impl<A> FavoritesUseCase<A>
where
    A: AnimeProvider,
{
    pub async fn execute(&self) -> Result<Favorites, ProxyError> {
        let profile = self.anime.profile().await?;
        Ok(profile.favorites)
    }
}

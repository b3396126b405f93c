use crate::domain::entities::{Artist, TimeRange};
use crate::domain::errors::ProxyError;
use crate::domain::ports::MusicProvider;

pub const DEFAULT_LIMIT: u8 = 5;
pub const MAX_LIMIT: u8 = 50;
// Genres shown per artist card.
pub const GENRES_PER_ARTIST: usize = 2;

pub struct TopArtistsUseCase<M> {
    pub music: M,
}

impl<M> TopArtistsUseCase<M>
where
    M: MusicProvider,
{
    pub async fn execute(
        &self,
        time_range: TimeRange,
        limit: u8,
    ) -> Result<Vec<Artist>, ProxyError> {
        let limit = limit.clamp(1, MAX_LIMIT);
        let token = self.music.access_token().await?;
        let artists = self
            .music
            .top_artists(&token, time_range, limit)
            .await?
            .into_iter()
            .map(|mut artist| {
                artist.genres.truncate(GENRES_PER_ARTIST);
                artist
            })
            .collect();

        Ok(artists)
    }
}

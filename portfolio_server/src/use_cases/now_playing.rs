use crate::domain::entities::Track;
use crate::domain::errors::ProxyError;
use crate::domain::ports::MusicProvider;

// Result of the now-playing lookup. `track` is `None` when there is nothing
// to show at all.
#[derive(Debug, PartialEq)]
pub struct NowPlaying {
    pub is_playing: bool,
    pub track: Option<Track>,
}

// Now-playing use case: live track first, last played track otherwise.
pub struct NowPlayingUseCase<M> {
    pub music: M,
}

impl<M> NowPlayingUseCase<M>
where
    M: MusicProvider,
{
    pub async fn execute(&self) -> Result<NowPlaying, ProxyError> {
        let token = self.music.access_token().await?;

        match self.music.currently_playing(&token).await {
            Ok(Some(playback)) if playback.is_playing => {
                if let Some(track) = playback.track {
                    return Ok(NowPlaying {
                        is_playing: true,
                        track: Some(track),
                    });
                }
            }
            Ok(_) => {}
            // Only an upstream status falls back; transport and decode failures surface.
            Err(err @ ProxyError::Upstream { .. }) => {
                tracing::warn!(error = %err, "currently playing lookup failed; falling back");
            }
            Err(err) => return Err(err),
        }

        let track = match self.music.recently_played(&token).await {
            Ok(track) => track,
            Err(err @ ProxyError::Upstream { .. }) => {
                tracing::warn!(error = %err, "recently played lookup failed");
                None
            }
            Err(err) => return Err(err),
        };

        Ok(NowPlaying {
            is_playing: false,
            track,
        })
    }
}

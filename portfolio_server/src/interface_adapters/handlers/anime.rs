use axum::{Json, extract::State};
use std::sync::Arc;

use crate::domain::entities::Favorites;
use crate::interface_adapters::handlers::{ApiError, map_proxy_error};
use crate::interface_adapters::protocol::{AnimeCardResponse, ProfileStatsResponse};
use crate::interface_adapters::state::AppState;
use crate::use_cases::anime_profile::{FavoritesUseCase, ProfileStatsUseCase};
use crate::use_cases::anime_showcase::AnimeShowcaseUseCase;

#[tracing::instrument(name = "anime_showcase", skip_all)]
pub async fn anime_showcase(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AnimeCardResponse>>, ApiError> {
    let use_case = AnimeShowcaseUseCase {
        anime: state.anime.clone(),
    };

    let cards = use_case.execute().await.map_err(map_proxy_error)?;

    Ok(Json(cards.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(name = "anime_stats", skip_all)]
pub async fn profile_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProfileStatsResponse>, ApiError> {
    let use_case = ProfileStatsUseCase {
        anime: state.anime.clone(),
    };

    let stats = use_case.execute().await.map_err(map_proxy_error)?;

    Ok(Json(stats.into()))
}

#[tracing::instrument(name = "anime_favorites", skip_all)]
pub async fn favorites(State(state): State<Arc<AppState>>) -> Result<Json<Favorites>, ApiError> {
    let use_case = FavoritesUseCase {
        anime: state.anime.clone(),
    };

    let favorites = use_case.execute().await.map_err(map_proxy_error)?;

    Ok(Json(favorites))
}

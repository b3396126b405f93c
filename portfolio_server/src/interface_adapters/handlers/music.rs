use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use std::sync::Arc;

use crate::domain::entities::TimeRange;
use crate::interface_adapters::handlers::{ApiError, error_response, map_proxy_error, reject_query};
use crate::interface_adapters::protocol::{NowPlayingResponse, TopArtistResponse, TopArtistsQuery};
use crate::interface_adapters::state::AppState;
use crate::use_cases::now_playing::NowPlayingUseCase;
use crate::use_cases::top_artists::{DEFAULT_LIMIT, MAX_LIMIT, TopArtistsUseCase};

#[tracing::instrument(name = "now_playing", skip_all)]
pub async fn now_playing(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NowPlayingResponse>, ApiError> {
    let use_case = NowPlayingUseCase {
        music: state.music.clone(),
    };

    let now = use_case.execute().await.map_err(map_proxy_error)?;

    Ok(Json(now.into()))
}

#[tracing::instrument(name = "top_artists", skip_all)]
pub async fn top_artists(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TopArtistsQuery>, QueryRejection>,
) -> Result<Json<Vec<TopArtistResponse>>, ApiError> {
    let Query(query) = query.map_err(reject_query)?;
    let (time_range, limit) = parse_top_artists_query(&query)?;
    tracing::debug!(time_range = time_range.as_str(), limit, "top artists requested");
    let use_case = TopArtistsUseCase {
        music: state.music.clone(),
    };

    let artists = use_case
        .execute(time_range, limit)
        .await
        .map_err(map_proxy_error)?;

    Ok(Json(artists.into_iter().map(Into::into).collect()))
}

fn parse_top_artists_query(query: &TopArtistsQuery) -> Result<(TimeRange, u8), ApiError> {
    let time_range = match query.time_range.as_deref() {
        None | Some("") => TimeRange::default(),
        Some(value) => TimeRange::parse(value).ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                "time_range must be one of short_term, medium_term, long_term",
            )
        })?,
    };

    let limit = match query.limit.as_deref() {
        None | Some("") => DEFAULT_LIMIT,
        Some(value) => value
            .parse::<u8>()
            .ok()
            .filter(|limit| (1..=MAX_LIMIT).contains(limit))
            .ok_or_else(|| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    format!("limit must be between 1 and {MAX_LIMIT}"),
                )
            })?,
    };

    Ok((time_range, limit))
}

use crate::interface_adapters::handlers::anime::{anime_showcase, favorites, profile_stats};
use crate::interface_adapters::handlers::guestbook::{create_entry, delete_entry, list_entries};
use crate::interface_adapters::handlers::music::{now_playing, top_artists};
use crate::interface_adapters::state::AppState;
use axum::http::{Method, header};
use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

// Builds the API router. With `static_dir`, unmatched paths are served from
// that directory behind the same CORS and trace layers.
pub fn app(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    // Preflight answers for browsers calling the API cross-origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Wire the HTTP routes to their handlers.
    let mut router = Router::new()
        .route(
            "/api/guestbook",
            get(list_entries).post(create_entry).delete(delete_entry),
        )
        .route("/api/mal", get(anime_showcase))
        .route("/api/mal-stats", get(profile_stats))
        .route("/api/mal-favorites", get(favorites))
        .route("/api/spotify", get(now_playing))
        .route("/api/spotify-stats", get(top_artists))
        .with_state(state);
    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}

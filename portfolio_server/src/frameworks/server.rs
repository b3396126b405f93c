// Framework bootstrap for the portfolio API.

use crate::domain::ports::EntryStore;
use crate::frameworks::config::{Settings, StoreBackend};
use crate::frameworks::db;
use crate::interface_adapters::clients::{JikanClient, SpotifyClient, SpotifyCredentials};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::interface_adapters::stores::{
    BlobEntryStore, FsBlobStore, HttpBlobStore, InMemoryEntryStore, PostgresEntryStore,
};

use std::{io::Result, sync::Arc};
use url::Url;

// Named blob store holding the guestbook collection.
const GUESTBOOK_BLOB_STORE: &str = "guestbook";

// Service name attached to startup and panic logs.
const SERVICE_NAME: &str = "portfolio_server";

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().with_current_span(true).init(),
        _ => builder.compact().init(),
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(service = SERVICE_NAME, %info, ?backtrace, "panic");
    }));
    tracing::info!(
        service = SERVICE_NAME,
        version = env!("CARGO_PKG_VERSION"),
        "starting"
    );
}

pub async fn run(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let address = listener.local_addr()?;
    // build state
    let state = build_state(&settings).await?;

    if let Some(dir) = &settings.static_dir {
        tracing::info!(static_dir = %dir.display(), "serving static files");
    }
    let router = app(state, settings.static_dir.as_deref());

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = Settings::load().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::other(e)
    })?;
    let host = settings.host.clone();
    let port = settings.port;

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .inspect_err(|e| {
            tracing::error!(%host, port, error = %e, "failed to bind");
        })?;

    run(listener, settings).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn build_state(settings: &Settings) -> Result<Arc<AppState>> {
    // One pooled HTTP client shared by every upstream adapter.
    let http = reqwest::Client::builder()
        .timeout(settings.upstream_timeout())
        .build()
        .map_err(|e| std::io::Error::other(format!("failed to initialize http client: {e}")))?;

    let entries = build_entry_store(settings, &http).await?;

    let jikan_url = parse_url("JIKAN_API_URL", &settings.jikan_api_url)?;
    let anime = JikanClient::new(http.clone(), jikan_url, settings.mal_username.clone());
    if settings.mal_username.is_none() {
        tracing::warn!("MAL_USERNAME is not set; anime endpoints will fail");
    }

    let secrets = &settings.secrets;
    let credentials = match (
        &secrets.spotify_client_id,
        &secrets.spotify_client_secret,
        &secrets.spotify_refresh_token,
    ) {
        (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(SpotifyCredentials {
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
            refresh_token: refresh_token.clone(),
        }),
        _ => {
            tracing::warn!("Spotify credentials are incomplete; music endpoints will fail");
            None
        }
    };
    let music = SpotifyClient::new(
        http,
        parse_url("SPOTIFY_TOKEN_URL", &settings.spotify_token_url)?,
        parse_url("SPOTIFY_API_URL", &settings.spotify_api_url)?,
        credentials,
    );

    if secrets.admin_secret.is_none() {
        tracing::info!("GUESTBOOK_ADMIN_SECRET is not set; guestbook deletion is disabled");
    }
    tracing::debug!(
        upstream_timeout_ms = settings.upstream_timeout_ms,
        jikan_api_url = %settings.jikan_api_url,
        spotify_api_url = %settings.spotify_api_url,
        "upstream clients configured"
    );

    Ok(Arc::new(AppState {
        entries,
        clock: Arc::new(SystemClock),
        anime: Arc::new(anime),
        music: Arc::new(music),
        admin_secret: secrets.admin_secret.as_deref().map(Arc::from),
    }))
}

async fn build_entry_store(
    settings: &Settings,
    http: &reqwest::Client,
) -> Result<Arc<dyn EntryStore>> {
    match settings.guestbook_store {
        StoreBackend::Memory => {
            tracing::info!(backend = "memory", "guestbook store configured");
            Ok(Arc::new(InMemoryEntryStore::new()))
        }
        StoreBackend::Blob => {
            // A local directory takes precedence over the hosted service.
            if let Some(dir) = &settings.guestbook_blob_dir {
                tracing::info!(backend = "blob", dir = %dir.display(), "guestbook store configured");
                let blobs = FsBlobStore::new(dir, GUESTBOOK_BLOB_STORE);
                return Ok(Arc::new(BlobEntryStore::new(blobs)));
            }

            let (Some(site_id), Some(token)) =
                (&settings.blob_site_id, &settings.secrets.blob_token)
            else {
                return Err(std::io::Error::other(
                    "blob store requires GUESTBOOK_BLOB_DIR or BLOB_SITE_ID and BLOB_TOKEN",
                ));
            };
            let blobs = HttpBlobStore::new(
                http.clone(),
                &settings.blob_api_url,
                site_id,
                GUESTBOOK_BLOB_STORE,
                token.clone(),
            )
            .map_err(|e| std::io::Error::other(format!("invalid BLOB_API_URL: {e}")))?;
            tracing::info!(backend = "blob", api_url = %settings.blob_api_url, "guestbook store configured");
            Ok(Arc::new(BlobEntryStore::new(blobs)))
        }
        StoreBackend::Postgres => {
            let database_url = settings
                .secrets
                .database_url
                .as_deref()
                .ok_or_else(|| std::io::Error::other("postgres store requires DATABASE_URL"))?;
            let pool = db::connect_pool(database_url).await.map_err(|e| {
                tracing::error!(error = %e, "failed to connect to database");
                std::io::Error::other(e)
            })?;
            db::run_migrations(&pool).await.map_err(|e| {
                tracing::error!(error = %e, "failed to run migrations");
                std::io::Error::other(e)
            })?;
            tracing::info!(backend = "postgres", "guestbook store configured");
            Ok(Arc::new(PostgresEntryStore { db: pool }))
        }
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| std::io::Error::other(format!("invalid {key}: {e}")))
}

// Shared primitives for one-time server bootstrapping across integration tests.
#![allow(dead_code)]

use portfolio_server::Settings;
use portfolio_server::frameworks::config::Secrets;
use serde_json::json;
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ADMIN_SECRET: &str = "integration-secret";

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Fake upstreams live on the same runtime as the server.
                let upstream = start_upstream().await;
                let settings = settings_for(&upstream);

                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                portfolio_server::run(listener, settings)
                    .await
                    .expect("server failed");
                drop(upstream);
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn settings_for(upstream: &MockServer) -> Settings {
    Settings {
        mal_username: Some("reader".to_string()),
        jikan_api_url: format!("{}/v4", upstream.uri()),
        spotify_token_url: format!("{}/api/token", upstream.uri()),
        spotify_api_url: format!("{}/v1", upstream.uri()),
        upstream_timeout_ms: 2000,
        secrets: Secrets {
            admin_secret: Some(ADMIN_SECRET.to_string()),
            spotify_client_id: Some("client-id".to_string()),
            spotify_client_secret: Some("client-secret".to_string()),
            spotify_refresh_token: Some("refresh-token".to_string()),
            ..Secrets::default()
        },
        ..Settings::default()
    }
}

fn list_item(title: &str, status: u8, score: u8) -> serde_json::Value {
    json!({
        "status": status,
        "score": score,
        "anime": {
            "title": title,
            "url": format!("https://myanimelist.net/anime/{title}"),
            "images": { "webp": { "large_image_url": format!("https://cdn.example/{title}.webp") } }
        }
    })
}

// Canned Jikan and Spotify responses shared by the proxy tests.
async fn start_upstream() -> MockServer {
    let upstream = MockServer::start().await;

    let list: Vec<_> = [
        ("Monster", 2, 9),
        ("Frieren", 1, 10),
        ("Dorohedoro", 4, 8),
        ("Mushishi", 2, 10),
        ("Haikyuu", 1, 7),
        ("Ping Pong", 2, 9),
        ("Planetes", 6, 0),
        ("Trigun", 2, 6),
        ("Baccano", 2, 8),
    ]
    .into_iter()
    .map(|(title, status, score)| list_item(title, status, score))
    .collect();
    Mock::given(method("GET"))
        .and(path("/v4/users/reader/animelist"))
        .and(header("user-agent", "Personal-Website-Project/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": list })))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/users/reader/full"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "username": "reader",
                "url": "https://myanimelist.net/profile/reader",
                "images": { "jpg": { "image_url": "https://cdn.example/reader.jpg" } },
                "statistics": {
                    "anime": { "days_watched": 120.5, "mean_score": 7.9, "completed": 300 },
                    "manga": { "days_read": 10.0, "chapters_read": 900 }
                },
                "favorites": {
                    "anime": [{
                        "title": "Mushishi",
                        "url": "https://myanimelist.net/anime/457",
                        "type": "TV",
                        "start_year": 2005
                    }],
                    "manga": [],
                    "characters": [{
                        "name": "Ginko",
                        "url": "https://myanimelist.net/character/425"
                    }]
                }
            }
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "integration-token" })),
        )
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .and(header("authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/recently-played"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "track": {
                    "name": "Roads",
                    "artists": [{ "name": "Portishead" }],
                    "album": { "name": "Dummy", "images": [{ "url": "https://img.example/dummy.jpg" }] },
                    "external_urls": { "spotify": "https://open.spotify.com/track/roads" }
                }
            }]
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me/top/artists"))
        .and(query_param("time_range", "medium_term"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "name": "Portishead",
                    "external_urls": { "spotify": "https://open.spotify.com/artist/p" },
                    "images": [{ "url": "https://img.example/p.jpg" }],
                    "genres": ["trip hop", "electronica", "bristol sound"]
                },
                {
                    "name": "Massive Attack",
                    "external_urls": { "spotify": "https://open.spotify.com/artist/m" },
                    "images": [],
                    "genres": []
                }
            ]
        })))
        .mount(&upstream)
        .await;

    upstream
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

use serde::Deserialize;
use std::{env, fmt, io, path::PathBuf, str::FromStr, time::Duration};

use crate::interface_adapters::clients::{jikan, spotify};

// Optional TOML file with non-secret settings; the environment wins.
pub const CONFIG_PATH_VAR: &str = "PORTFOLIO_CONFIG";
pub const DEFAULT_BLOB_API_URL: &str = "https://api.netlify.com/api/v1/blobs";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Blob,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "blob" => Ok(StoreBackend::Blob),
            "postgres" => Ok(StoreBackend::Postgres),
            _ => Err(()),
        }
    }
}

// Values that only ever come from the environment.
#[derive(Clone, Default)]
pub struct Secrets {
    pub admin_secret: Option<String>,
    pub blob_token: Option<String>,
    pub database_url: Option<String>,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_refresh_token: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub upstream_timeout_ms: u64,
    pub guestbook_store: StoreBackend,
    pub guestbook_blob_dir: Option<PathBuf>,
    pub blob_api_url: String,
    pub blob_site_id: Option<String>,
    pub mal_username: Option<String>,
    pub jikan_api_url: String,
    pub spotify_token_url: String,
    pub spotify_api_url: String,
    #[serde(skip)]
    pub secrets: Secrets,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: None,
            upstream_timeout_ms: 5000,
            guestbook_store: StoreBackend::Memory,
            guestbook_blob_dir: None,
            blob_api_url: DEFAULT_BLOB_API_URL.to_string(),
            blob_site_id: None,
            mal_username: None,
            jikan_api_url: jikan::DEFAULT_API_URL.to_string(),
            spotify_token_url: spotify::DEFAULT_TOKEN_URL.to_string(),
            spotify_api_url: spotify::DEFAULT_API_URL.to_string(),
            secrets: Secrets::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse(toml::de::Error),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse(err) => write!(f, "invalid config file: {err}"),
            ConfigError::Invalid { key, value } => write!(f, "invalid value for {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl Settings {
    // Read the optional config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.is_empty() => {
                let path = PathBuf::from(path);
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Some(contents)
            }
            _ => None,
        };

        Self::from_sources(file.as_deref(), |key| env::var(key).ok())
    }

    pub fn from_sources(
        file: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut settings = match file {
            Some(contents) => toml::from_str(contents).map_err(ConfigError::Parse)?,
            None => Settings::default(),
        };
        // Empty variables count as unset.
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = var("HOST") {
            settings.host = value;
        }
        if let Some(value) = var("PORT") {
            settings.port = parse_var("PORT", value)?;
        }
        if let Some(value) = var("STATIC_DIR") {
            settings.static_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = var("UPSTREAM_TIMEOUT_MS") {
            settings.upstream_timeout_ms = parse_var("UPSTREAM_TIMEOUT_MS", value)?;
        }
        if let Some(value) = var("GUESTBOOK_STORE") {
            settings.guestbook_store = parse_var("GUESTBOOK_STORE", value)?;
        }
        if let Some(value) = var("GUESTBOOK_BLOB_DIR") {
            settings.guestbook_blob_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = var("BLOB_API_URL") {
            settings.blob_api_url = value;
        }
        if let Some(value) = var("BLOB_SITE_ID") {
            settings.blob_site_id = Some(value);
        }
        if let Some(value) = var("MAL_USERNAME") {
            settings.mal_username = Some(value);
        }
        if let Some(value) = var("JIKAN_API_URL") {
            settings.jikan_api_url = value;
        }
        if let Some(value) = var("SPOTIFY_TOKEN_URL") {
            settings.spotify_token_url = value;
        }
        if let Some(value) = var("SPOTIFY_API_URL") {
            settings.spotify_api_url = value;
        }

        settings.secrets = Secrets {
            admin_secret: var("GUESTBOOK_ADMIN_SECRET"),
            blob_token: var("BLOB_TOKEN"),
            database_url: var("DATABASE_URL"),
            spotify_client_id: var("SPOTIFY_CLIENT_ID"),
            spotify_client_secret: var("SPOTIFY_CLIENT_SECRET"),
            spotify_refresh_token: var("SPOTIFY_REFRESH_TOKEN"),
        };

        if settings.upstream_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_MS",
                value: "0".to_string(),
            });
        }

        Ok(settings)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

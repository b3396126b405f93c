use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::entities::{
    AnimeListEntry, Artist, GuestbookEntry, Playback, TimeRange, Track, UserProfile,
};
use crate::domain::errors::{ProxyError, StoreError};
use crate::domain::ports::{AnimeProvider, Clock, EntryStore, MusicProvider};

pub(crate) type EntryTable = Arc<Mutex<HashMap<String, GuestbookEntry>>>;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at_epoch_seconds(seconds: i64) -> Self {
        Self(at(seconds))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .expect("valid test timestamp")
}

pub(crate) fn entry(id: &str, name: &str, created_at_seconds: i64) -> GuestbookEntry {
    GuestbookEntry {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        message: format!("hello from {name}"),
        created_at: at(created_at_seconds),
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub list: bool,
    pub append: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingStore {
    entries: EntryTable,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_entry(&self, entry: GuestbookEntry) {
        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.insert(entry.id.clone(), entry);
    }

    pub(crate) fn get_test_entry(&self, id: &str) -> Option<GuestbookEntry> {
        let guard = self.entries.lock().expect("entries mutex poisoned");
        guard.get(id).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().expect("entries mutex poisoned").len()
    }
}

#[async_trait]
impl EntryStore for RecordingStore {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, StoreError> {
        if self.failures.list {
            return Err(StoreError::Unavailable("list failed".to_string()));
        }

        let guard = self.entries.lock().expect("entries mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn append(&self, entry: GuestbookEntry) -> Result<GuestbookEntry, StoreError> {
        if self.failures.append {
            return Err(StoreError::Unavailable("append failed".to_string()));
        }

        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        if self.failures.remove {
            return Err(StoreError::Unavailable("remove failed".to_string()));
        }

        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        Ok(guard.remove(id).is_some())
    }
}

pub(crate) fn track(title: &str) -> Track {
    Track {
        title: title.to_string(),
        artists: vec!["Artist A".to_string(), "Artist B".to_string()],
        album: format!("{title} (Album)"),
        album_image_url: Some(format!("https://img.example/{title}.jpg")),
        song_url: Some(format!("https://open.example/track/{title}")),
    }
}

// Scripted music provider; each field is the canned answer for one call.
pub(crate) struct ScriptedMusic {
    pub token: Result<String, ProxyError>,
    pub currently_playing: Result<Option<Playback>, ProxyError>,
    pub recently_played: Result<Option<Track>, ProxyError>,
    pub top_artists: Result<Vec<Artist>, ProxyError>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl ScriptedMusic {
    pub(crate) fn new() -> Self {
        Self {
            token: Ok("access-token".to_string()),
            currently_playing: Ok(None),
            recently_played: Ok(None),
            top_artists: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

// ProxyError is not Clone, so canned failures are rebuilt per call.
pub(crate) fn replay<T: Clone>(result: &Result<T, ProxyError>) -> Result<T, ProxyError> {
    match result {
        Ok(value) => Ok(value.clone()),
        Err(ProxyError::MissingConfiguration(message)) => {
            Err(ProxyError::MissingConfiguration(message))
        }
        Err(ProxyError::TokenExchange) => Err(ProxyError::TokenExchange),
        Err(ProxyError::Upstream {
            status,
            message,
            details,
        }) => Err(ProxyError::Upstream {
            status: *status,
            message: message.clone(),
            details: details.clone(),
        }),
        Err(ProxyError::Transport(reason)) => Err(ProxyError::Transport(reason.clone())),
        Err(ProxyError::Decode(reason)) => Err(ProxyError::Decode(reason.clone())),
    }
}

#[async_trait]
impl MusicProvider for ScriptedMusic {
    async fn access_token(&self) -> Result<String, ProxyError> {
        self.record("access_token");
        replay(&self.token)
    }

    async fn currently_playing(&self, access_token: &str) -> Result<Option<Playback>, ProxyError> {
        assert_eq!(access_token, "access-token");
        self.record("currently_playing");
        replay(&self.currently_playing)
    }

    async fn recently_played(&self, access_token: &str) -> Result<Option<Track>, ProxyError> {
        assert_eq!(access_token, "access-token");
        self.record("recently_played");
        replay(&self.recently_played)
    }

    async fn top_artists(
        &self,
        access_token: &str,
        _time_range: TimeRange,
        limit: u8,
    ) -> Result<Vec<Artist>, ProxyError> {
        assert_eq!(access_token, "access-token");
        self.record("top_artists");
        replay(&self.top_artists).map(|artists| artists.into_iter().take(limit as usize).collect())
    }
}

pub(crate) struct ScriptedAnime {
    pub list: Result<Vec<AnimeListEntry>, ProxyError>,
    pub profile: Result<UserProfile, ProxyError>,
}

impl ScriptedAnime {
    pub(crate) fn new() -> Self {
        Self {
            list: Ok(Vec::new()),
            profile: Ok(UserProfile::default()),
        }
    }
}

#[async_trait]
impl AnimeProvider for ScriptedAnime {
    async fn anime_list(&self) -> Result<Vec<AnimeListEntry>, ProxyError> {
        replay(&self.list)
    }

    async fn profile(&self) -> Result<UserProfile, ProxyError> {
        replay(&self.profile)
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::{
    AnimeListEntry, Artist, BlobObject, GuestbookEntry, Playback, TimeRange, Track, UserProfile,
};
use crate::domain::errors::{ProxyError, StoreError};

// Port for guestbook persistence used by guestbook use cases.
// Listing makes no ordering promise; callers sort.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, StoreError>;
    async fn append(&self, entry: GuestbookEntry) -> Result<GuestbookEntry, StoreError>;
    async fn remove_by_id(&self, id: &str) -> Result<bool, StoreError>;
}

// Port for a key-value blob service with versioned writes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<BlobObject>, StoreError>;

    // `expected_version = None` only succeeds when the key does not exist yet.
    // Returns the version of the written blob or `StoreError::Conflict`.
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        expected_version: Option<&str>,
    ) -> Result<String, StoreError>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// Port for the anime tracking service.
#[async_trait]
pub trait AnimeProvider: Send + Sync {
    async fn anime_list(&self) -> Result<Vec<AnimeListEntry>, ProxyError>;
    async fn profile(&self) -> Result<UserProfile, ProxyError>;
}

// Port for the music streaming service. Every call after `access_token`
// takes the token explicitly so one exchange serves one request.
#[async_trait]
pub trait MusicProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, ProxyError>;

    // `Ok(None)` when the service reports nothing active.
    async fn currently_playing(&self, access_token: &str) -> Result<Option<Playback>, ProxyError>;

    // `Ok(None)` when there is no listening history.
    async fn recently_played(&self, access_token: &str) -> Result<Option<Track>, ProxyError>;

    async fn top_artists(
        &self,
        access_token: &str,
        time_range: TimeRange,
        limit: u8,
    ) -> Result<Vec<Artist>, ProxyError>;
}

#[async_trait]
impl<T: EntryStore + ?Sized> EntryStore for Arc<T> {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, StoreError> {
        (**self).list().await
    }

    async fn append(&self, entry: GuestbookEntry) -> Result<GuestbookEntry, StoreError> {
        (**self).append(entry).await
    }

    async fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        (**self).remove_by_id(id).await
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[async_trait]
impl<T: AnimeProvider + ?Sized> AnimeProvider for Arc<T> {
    async fn anime_list(&self) -> Result<Vec<AnimeListEntry>, ProxyError> {
        (**self).anime_list().await
    }

    async fn profile(&self) -> Result<UserProfile, ProxyError> {
        (**self).profile().await
    }
}

#[async_trait]
impl<T: MusicProvider + ?Sized> MusicProvider for Arc<T> {
    async fn access_token(&self) -> Result<String, ProxyError> {
        (**self).access_token().await
    }

    async fn currently_playing(&self, access_token: &str) -> Result<Option<Playback>, ProxyError> {
        (**self).currently_playing(access_token).await
    }

    async fn recently_played(&self, access_token: &str) -> Result<Option<Track>, ProxyError> {
        (**self).recently_played(access_token).await
    }

    async fn top_artists(
        &self,
        access_token: &str,
        time_range: TimeRange,
        limit: u8,
    ) -> Result<Vec<Artist>, ProxyError> {
        (**self).top_artists(access_token, time_range, limit).await
    }
}

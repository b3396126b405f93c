use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::ports::{AnimeProvider, Clock, EntryStore, MusicProvider};

// Application state shared by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub entries: Arc<dyn EntryStore>,
    pub clock: Arc<dyn Clock>,
    pub anime: Arc<dyn AnimeProvider>,
    pub music: Arc<dyn MusicProvider>,
    // Shared secret for guestbook deletion; `None` disables deletes.
    pub admin_secret: Option<Arc<str>>,
}

// System clock adapter used by guestbook use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

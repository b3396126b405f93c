use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::GuestbookEntry;
use crate::domain::errors::StoreError;
use crate::domain::ports::EntryStore;

// In-memory entry store; contents are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryEntryStore {
    pub entries: Arc<Mutex<HashMap<String, GuestbookEntry>>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries.values().cloned().collect())
    }

    async fn append(&self, entry: GuestbookEntry) -> Result<GuestbookEntry, StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().await;
        Ok(entries.remove(id).is_some())
    }
}

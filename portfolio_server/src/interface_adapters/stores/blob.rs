use async_trait::async_trait;

use crate::domain::entities::GuestbookEntry;
use crate::domain::errors::StoreError;
use crate::domain::ports::{BlobStore, EntryStore};

// Key holding the whole collection as one JSON array.
pub const ENTRIES_KEY: &str = "entries.json";
// Read-modify-write attempts before a lost race is reported.
const MAX_WRITE_ATTEMPTS: usize = 5;

// Entry store persisting the collection as a single JSON blob. Every
// mutation rewrites the array with a version-conditional write.
pub struct BlobEntryStore<B> {
    blobs: B,
    key: String,
}

impl<B> BlobEntryStore<B>
where
    B: BlobStore,
{
    pub fn new(blobs: B) -> Self {
        Self {
            blobs,
            key: ENTRIES_KEY.to_string(),
        }
    }

    async fn read(&self) -> Result<(Vec<GuestbookEntry>, Option<String>), StoreError> {
        match self.blobs.get(&self.key).await? {
            Some(blob) => {
                let entries = serde_json::from_slice(&blob.data)
                    .map_err(|err| StoreError::Corrupt(err.to_string()))?;
                Ok((entries, Some(blob.version)))
            }
            None => Ok((Vec::new(), None)),
        }
    }

    // Applies `mutate` to a fresh copy of the collection until the write
    // lands on the version it read. Returns whatever `mutate` returned.
    async fn update<T, F>(&self, mut mutate: F) -> Result<T, StoreError>
    where
        F: FnMut(&mut Vec<GuestbookEntry>) -> (T, bool) + Send,
        T: Send,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let (mut entries, version) = self.read().await?;
            let (outcome, changed) = mutate(&mut entries);
            if !changed {
                return Ok(outcome);
            }

            let data = serde_json::to_vec(&entries)
                .map_err(|err| StoreError::Corrupt(err.to_string()))?;
            match self.blobs.put(&self.key, data, version.as_deref()).await {
                Ok(_) => return Ok(outcome),
                Err(StoreError::Conflict) => {
                    tracing::debug!(attempt, key = %self.key, "blob write conflict; retrying");
                }
                Err(err) => return Err(err),
            }
        }

        tracing::warn!(key = %self.key, "blob write kept conflicting; giving up");
        Err(StoreError::Conflict)
    }
}

#[async_trait]
impl<B> EntryStore for BlobEntryStore<B>
where
    B: BlobStore,
{
    async fn list(&self) -> Result<Vec<GuestbookEntry>, StoreError> {
        let (entries, _) = self.read().await?;
        Ok(entries)
    }

    async fn append(&self, entry: GuestbookEntry) -> Result<GuestbookEntry, StoreError> {
        self.update(|entries| {
            entries.push(entry.clone());
            ((), true)
        })
        .await?;
        Ok(entry)
    }

    async fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        self.update(|entries| {
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            let removed = entries.len() != before;
            (removed, removed)
        })
        .await
    }
}

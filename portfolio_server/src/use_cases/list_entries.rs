use crate::domain::entities::GuestbookEntry;
use crate::domain::errors::GuestbookError;
use crate::domain::ports::EntryStore;

// List use case; owns the newest-first ordering the stores do not promise.
pub struct ListEntriesUseCase<S> {
    pub store: S,
}

impl<S> ListEntriesUseCase<S>
where
    S: EntryStore,
{
    pub async fn execute(&self) -> Result<Vec<GuestbookEntry>, GuestbookError> {
        let mut entries = self.store.list().await.map_err(GuestbookError::Storage)?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }
}

fn sort_newest_first(entries: &mut [GuestbookEntry]) {
    // Id tie-break keeps equal timestamps stable across backends.
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

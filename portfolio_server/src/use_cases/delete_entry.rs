use crate::domain::errors::GuestbookError;
use crate::domain::ports::EntryStore;

// Delete use case gated by a server-held shared secret.
pub struct DeleteEntryUseCase<'a, S> {
    pub store: S,
    // `None` disables deletion entirely.
    pub admin_secret: Option<&'a str>,
}

impl<S> DeleteEntryUseCase<'_, S>
where
    S: EntryStore,
{
    pub async fn execute(
        &self,
        id: Option<&str>,
        secret: Option<&str>,
    ) -> Result<(), GuestbookError> {
        // Secret is checked before the id so callers cannot discover which ids exist.
        let expected = match self.admin_secret {
            Some(expected) if !expected.is_empty() => expected,
            _ => return Err(GuestbookError::DeletionDisabled),
        };
        let provided = secret.unwrap_or_default();
        if provided.is_empty() || !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            return Err(GuestbookError::InvalidSecret);
        }

        let id = match id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(GuestbookError::MissingId),
        };

        let removed = self
            .store
            .remove_by_id(id)
            .await
            .map_err(GuestbookError::Storage)?;
        if !removed {
            return Err(GuestbookError::NotFound);
        }

        Ok(())
    }
}

// Runs in time dependent only on the lengths, never on where bytes differ.
fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

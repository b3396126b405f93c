use uuid::Uuid;

use crate::domain::entities::{GuestbookEntry, NewGuestbookEntry};
use crate::domain::errors::{EntryField, GuestbookError};
use crate::domain::ports::{Clock, EntryStore};

pub const MAX_NAME_CHARS: usize = 80;
pub const MAX_EMAIL_CHARS: usize = 254;
pub const MAX_MESSAGE_CHARS: usize = 1000;

// Create use case with injected dependencies.
pub struct CreateEntryUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> CreateEntryUseCase<C, S>
where
    C: Clock,
    S: EntryStore,
{
    pub async fn execute(
        &self,
        candidate: NewGuestbookEntry,
    ) -> Result<GuestbookEntry, GuestbookError> {
        let name = required(candidate.name, EntryField::Name, MAX_NAME_CHARS)?;
        let message = required(candidate.message, EntryField::Message, MAX_MESSAGE_CHARS)?;
        let email = optional(candidate.email, EntryField::Email, MAX_EMAIL_CHARS)?;

        let entry = GuestbookEntry {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            message,
            created_at: self.clock.now(),
        };

        self.store
            .append(entry)
            .await
            .map_err(GuestbookError::Storage)
    }
}

fn required(
    value: Option<String>,
    field: EntryField,
    max: usize,
) -> Result<String, GuestbookError> {
    match optional(value, field, max)? {
        Some(value) => Ok(value),
        None => Err(GuestbookError::MissingField(field)),
    }
}

// Blank counts as absent.
fn optional(
    value: Option<String>,
    field: EntryField,
    max: usize,
) -> Result<Option<String>, GuestbookError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(GuestbookError::FieldTooLong { field, max });
    }
    Ok(Some(trimmed.to_string()))
}

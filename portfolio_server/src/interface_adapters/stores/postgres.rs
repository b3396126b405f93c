use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::entities::GuestbookEntry;
use crate::domain::errors::StoreError;
use crate::domain::ports::EntryStore;

// PostgreSQL-backed entry store, one row per entry.
#[derive(Clone)]
pub struct PostgresEntryStore {
    pub db: PgPool,
}

#[derive(FromRow)]
struct EntryRow {
    id: String,
    name: String,
    email: Option<String>,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for GuestbookEntry {
    fn from(row: EntryRow) -> Self {
        GuestbookEntry {
            id: row.id,
            name: row.name,
            email: row.email,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

fn db_error(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl EntryStore for PostgresEntryStore {
    async fn list(&self) -> Result<Vec<GuestbookEntry>, StoreError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, name, email, message, created_at
            FROM guestbook_entries
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(GuestbookEntry::from).collect())
    }

    async fn append(&self, entry: GuestbookEntry) -> Result<GuestbookEntry, StoreError> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            INSERT INTO guestbook_entries (id, name, email, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.name)
        .bind(&entry.email)
        .bind(&entry.message)
        .bind(entry.created_at)
        .fetch_one(&self.db)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    async fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM guestbook_entries WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

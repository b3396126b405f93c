use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::domain::entities::BlobObject;
use crate::domain::errors::StoreError;
use crate::domain::ports::BlobStore;

// Blob store backed by a local directory: `<root>/<store>/<key>`.
// Versions are content hashes; writes are serialized in-process.
pub struct FsBlobStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, store_name: &str) -> Self {
        Self {
            dir: root.into().join(store_name),
            write_lock: Mutex::new(()),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        // Keys are flat names; anything path-like could escape the store.
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StoreError::Unavailable(format!("invalid blob key: {key}")));
        }
        Ok(self.dir.join(key))
    }

    async fn read(&self, key: &str) -> Result<Option<BlobObject>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => {
                let version = content_version(&data);
                Ok(Some(BlobObject { data, version }))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Unavailable(format!(
                "failed to read {}: {err}",
                path.display()
            ))),
        }
    }
}

fn content_version(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

fn io_error(err: std::io::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> Result<Option<BlobObject>, StoreError> {
        self.read(key).await
    }

    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        expected_version: Option<&str>,
    ) -> Result<String, StoreError> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock().await;

        let current = self.read(key).await?;
        if current.as_ref().map(|blob| blob.version.as_str()) != expected_version {
            return Err(StoreError::Conflict);
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_error)?;
        // Rename keeps readers from ever seeing a half-written array.
        let tmp = self.dir.join(format!(".{key}.tmp"));
        tokio::fs::write(&tmp, &data).await.map_err(io_error)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_error)?;

        Ok(content_version(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::EntryStore;
    use crate::interface_adapters::stores::blob::BlobEntryStore;
    use crate::use_cases::test_support::entry;
    use std::sync::Arc;

    #[tokio::test]
    async fn when_key_was_never_written_then_get_returns_none() {
        let dir = tempfile::tempdir().expect("expected temp dir");
        let blobs = FsBlobStore::new(dir.path(), "guestbook");

        let blob = blobs.get("entries.json").await.expect("expected get");

        assert!(blob.is_none());
    }

    #[tokio::test]
    async fn when_written_then_file_lands_under_store_directory() {
        let dir = tempfile::tempdir().expect("expected temp dir");
        let blobs = FsBlobStore::new(dir.path(), "guestbook");

        let version = blobs
            .put("entries.json", b"[]".to_vec(), None)
            .await
            .expect("expected put to succeed");

        let on_disk = std::fs::read(dir.path().join("guestbook").join("entries.json"))
            .expect("expected file on disk");
        assert_eq!(on_disk, b"[]");
        assert_eq!(version, content_version(b"[]"));
        assert_eq!(version.len(), 64);
    }

    #[tokio::test]
    async fn when_expected_version_is_stale_then_put_conflicts() {
        let dir = tempfile::tempdir().expect("expected temp dir");
        let blobs = FsBlobStore::new(dir.path(), "guestbook");
        let first = blobs
            .put("entries.json", b"[1]".to_vec(), None)
            .await
            .expect("expected first put");
        blobs
            .put("entries.json", b"[1,2]".to_vec(), Some(&first))
            .await
            .expect("expected second put");

        let stale = blobs.put("entries.json", b"[9]".to_vec(), Some(&first)).await;
        let create_again = blobs.put("entries.json", b"[9]".to_vec(), None).await;

        assert!(matches!(stale, Err(StoreError::Conflict)));
        assert!(matches!(create_again, Err(StoreError::Conflict)));
        let current = blobs
            .get("entries.json")
            .await
            .expect("expected get")
            .expect("expected blob");
        assert_eq!(current.data, b"[1,2]");
    }

    #[tokio::test]
    async fn when_key_is_path_like_then_it_is_rejected() {
        let dir = tempfile::tempdir().expect("expected temp dir");
        let blobs = FsBlobStore::new(dir.path(), "guestbook");

        let result = blobs.put("../escape.json", b"[]".to_vec(), None).await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn when_many_entries_are_appended_concurrently_then_none_are_lost() {
        let dir = tempfile::tempdir().expect("expected temp dir");
        let store = Arc::new(BlobEntryStore::new(FsBlobStore::new(
            dir.path(),
            "guestbook",
        )));

        let mut tasks = Vec::new();
        for i in 0..4 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .append(entry(&format!("entry-{i}"), "Ada", 1_700_000_000 + i))
                    .await
            }));
        }
        for task in tasks {
            task.await
                .expect("expected task to join")
                .expect("expected append to succeed");
        }

        let entries = store.list().await.expect("expected list");
        assert_eq!(entries.len(), 4);
    }
}

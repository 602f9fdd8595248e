//! Directory blob store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::{BlobStore, StorageError};
use crate::domain::recording::{AudioMimeType, AudioPayload, RecordingId};

use super::map_io_error;

/// Current blob container schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Blob store backed by a versioned container directory.
///
/// Each entry is a pair of files keyed by recording id: `<id>.bin` with
/// the payload bytes and `<id>.mime` with the container type. The
/// container directory (`blobs-v<N>`) is created lazily the first time it
/// is needed; creation is idempotent.
pub struct DirBlobStore {
    root: PathBuf,
    version: u32,
}

impl DirBlobStore {
    /// Open a store under the given data directory at the current
    /// schema version. No I/O happens until first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::open(root, SCHEMA_VERSION)
    }

    /// Open a store at an explicit schema version
    pub fn open(root: impl Into<PathBuf>, version: u32) -> Self {
        Self {
            root: root.into(),
            version,
        }
    }

    /// Path of the versioned container directory
    pub fn container(&self) -> PathBuf {
        self.root.join(format!("blobs-v{}", self.version))
    }

    async fn ensure_container(&self) -> Result<PathBuf, StorageError> {
        let container = self.container();
        // create_dir_all succeeds when the container already exists
        fs::create_dir_all(&container).await.map_err(map_io_error)?;
        Ok(container)
    }

    fn data_path(&self, id: &RecordingId) -> PathBuf {
        self.container().join(format!("{}.bin", id))
    }

    fn mime_path(&self, id: &RecordingId) -> PathBuf {
        self.container().join(format!("{}.mime", id))
    }
}

#[async_trait]
impl BlobStore for DirBlobStore {
    async fn put(&self, id: &RecordingId, payload: &AudioPayload) -> Result<(), StorageError> {
        self.ensure_container().await?;

        fs::write(self.data_path(id), payload.data())
            .await
            .map_err(map_io_error)?;
        fs::write(self.mime_path(id), payload.mime_type().as_str())
            .await
            .map_err(map_io_error)?;

        debug!("stored blob {id} ({} bytes)", payload.size_bytes());
        Ok(())
    }

    async fn get(&self, id: &RecordingId) -> Result<Option<AudioPayload>, StorageError> {
        let data = match fs::read(self.data_path(id)).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(map_io_error(err)),
        };

        let mime = match fs::read_to_string(self.mime_path(id)).await {
            Ok(mime) => mime,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::Corrupt(format!(
                    "blob {id} has no MIME type tag"
                )))
            }
            Err(err) => return Err(map_io_error(err)),
        };

        let mime_type = AudioMimeType::from_mime(&mime)
            .ok_or_else(|| StorageError::Corrupt(format!("unknown MIME type: {mime}")))?;

        Ok(Some(AudioPayload::new(data, mime_type)))
    }

    async fn delete(&self, id: &RecordingId) -> Result<(), StorageError> {
        for path in [self.data_path(id), self.mime_path(id)] {
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(map_io_error(err)),
            }
        }
        Ok(())
    }
}

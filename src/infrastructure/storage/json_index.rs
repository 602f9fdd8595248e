//! JSON-file metadata index adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{MetadataIndex, StorageError};
use crate::domain::recording::RecordingMetadata;

use super::map_io_error;

/// Index file name inside the data directory
const INDEX_FILE: &str = "recordings.json";

/// Metadata index persisted as a single JSON document.
///
/// The list is small, so every mutation is a whole-document rewrite by
/// the caller; a missing file reads as an empty list.
pub struct JsonFileIndex {
    path: PathBuf,
}

impl JsonFileIndex {
    /// Create an index stored under the given data directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            path: root.into().join(INDEX_FILE),
        }
    }

    /// Create with an explicit file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the index file path
    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    /// Check if the index file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[async_trait]
impl MetadataIndex for JsonFileIndex {
    async fn load(&self) -> Result<Vec<RecordingMetadata>, StorageError> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).await.map_err(map_io_error)?;

        serde_json::from_str(&content).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    async fn store(&self, entries: &[RecordingMetadata]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(map_io_error)?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Io(e.to_string()))?;

        fs::write(&self.path, content).await.map_err(map_io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::{Elapsed, RecordingId};

    fn entry(id: &str, secs: u64) -> RecordingMetadata {
        RecordingMetadata::new(RecordingId::new(id), Elapsed::from_secs(secs))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonFileIndex::new(dir.path());

        assert!(!index.exists());
        assert!(index.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_and_load_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonFileIndex::new(dir.path());

        let entries = vec![entry("3", 10), entry("1", 20), entry("2", 30)];
        index.store(&entries).await.unwrap();

        let loaded = index.load().await.unwrap();
        assert_eq!(loaded, entries);
    }

    #[tokio::test]
    async fn store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonFileIndex::new(dir.path().join("nested").join("deeper"));

        index.store(&[entry("1", 5)]).await.unwrap();
        assert!(index.exists());
    }

    #[tokio::test]
    async fn corrupt_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonFileIndex::new(dir.path());
        tokio::fs::write(index.path(), "not json").await.unwrap();

        assert!(matches!(
            index.load().await,
            Err(StorageError::Corrupt(_))
        ));
    }
}

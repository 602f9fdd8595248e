//! Storage port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{AudioPayload, RecordingId, RecordingMetadata};

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("Storage I/O failed: {0}")]
    Io(String),
}

/// Port for the lightweight metadata index.
///
/// The index is the single source of truth for which recordings exist.
/// It is small, so whole-list read-modify-write is the mutation model;
/// callers must re-read before every mutation.
#[async_trait]
pub trait MetadataIndex: Send + Sync {
    /// Load the full metadata list in insertion order.
    /// A missing index reads as an empty list.
    async fn load(&self) -> Result<Vec<RecordingMetadata>, StorageError>;

    /// Replace the persisted list with `entries`, preserving their order
    async fn store(&self, entries: &[RecordingMetadata]) -> Result<(), StorageError>;
}

/// Port for the blob-capable payload store, keyed by recording id
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a payload under `id`, overwriting any previous entry
    async fn put(&self, id: &RecordingId, payload: &AudioPayload) -> Result<(), StorageError>;

    /// Look up the payload for `id`. `Ok(None)` means no entry exists;
    /// that is an expected outcome, not an error.
    async fn get(&self, id: &RecordingId) -> Result<Option<AudioPayload>, StorageError>;

    /// Remove the entry for `id` if present. Deleting a missing entry
    /// is a no-op.
    async fn delete(&self, id: &RecordingId) -> Result<(), StorageError>;
}

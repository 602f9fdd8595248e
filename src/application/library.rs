//! Recording library use case
//!
//! Durable persistence of recordings across two cooperating backends:
//! the metadata index (source of truth for which recordings exist) and
//! the blob store (payload bytes). Degradation is explicit: a failed blob
//! write falls back to embedding the payload in the metadata entry, and a
//! metadata entry whose payload resolves nowhere is an orphan, skipped
//! from playback-ready results rather than raised as an error.

use tracing::{debug, error, warn};

use crate::domain::recording::{AudioPayload, RecordingId, RecordingMetadata};

use super::ports::{BlobStore, MetadataIndex, StorageError};

/// A metadata entry together with its resolved payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecording {
    pub metadata: RecordingMetadata,
    pub payload: AudioPayload,
}

/// Recording persistence across the metadata index and the blob store
pub struct RecordingLibrary<M, B>
where
    M: MetadataIndex,
    B: BlobStore,
{
    index: M,
    blobs: B,
}

impl<M, B> RecordingLibrary<M, B>
where
    M: MetadataIndex,
    B: BlobStore,
{
    /// Create a library over the two backends
    pub fn new(index: M, blobs: B) -> Self {
        Self { index, blobs }
    }

    /// Persist a finalized recording: append the metadata entry, then
    /// store the payload.
    ///
    /// The metadata append must succeed; a blob-store failure degrades to
    /// the inline fallback encoding, and a fallback failure is logged and
    /// swallowed (the entry becomes an orphan). Neither blocks subsequent
    /// recordings.
    pub async fn save(
        &self,
        metadata: RecordingMetadata,
        payload: AudioPayload,
    ) -> Result<(), StorageError> {
        let id = metadata.id.clone();
        self.append_entry(metadata).await?;

        if let Err(err) = self.blobs.put(&id, &payload).await {
            warn!("blob store rejected payload for {id}: {err}; falling back to inline encoding");
            if let Err(fallback_err) = self.patch_inline(&id, &payload).await {
                error!("inline fallback failed for {id}: {fallback_err}; entry will be an orphan");
            }
        }

        Ok(())
    }

    /// Load the raw metadata list in insertion order, orphans included
    pub async fn load_index(&self) -> Result<Vec<RecordingMetadata>, StorageError> {
        self.index.load().await
    }

    /// Load all playback-ready recordings in insertion order.
    ///
    /// Per entry, resolution tries the blob store first, then the inline
    /// fallback data. Entries that resolve nowhere are skipped; one bad
    /// entry never prevents the rest from loading.
    pub async fn load_all(&self) -> Result<Vec<ResolvedRecording>, StorageError> {
        let entries = self.index.load().await?;
        let mut resolved = Vec::with_capacity(entries.len());

        for entry in entries {
            match self.resolve(&entry).await {
                Some(payload) => resolved.push(ResolvedRecording {
                    metadata: entry,
                    payload,
                }),
                None => warn!("recording {} has no resolvable payload; skipping", entry.id),
            }
        }

        Ok(resolved)
    }

    /// Remove a recording from both backends.
    ///
    /// Both deletions are always attempted; a failure in one does not
    /// prevent the other. The first error is reported after both ran.
    pub async fn delete(&self, id: &RecordingId) -> Result<(), StorageError> {
        let index_result = self.remove_entry(id).await;
        if let Err(err) = &index_result {
            error!("failed to remove {id} from the metadata index: {err}");
        }

        let blob_result = self.blobs.delete(id).await;
        if let Err(err) = &blob_result {
            error!("failed to remove {id} from the blob store: {err}");
        }

        index_result.and(blob_result)
    }

    async fn append_entry(&self, entry: RecordingMetadata) -> Result<(), StorageError> {
        // Re-read before mutating so interleaved saves never lose entries
        let mut entries = self.index.load().await?;
        entries.push(entry);
        self.index.store(&entries).await
    }

    async fn remove_entry(&self, id: &RecordingId) -> Result<(), StorageError> {
        let mut entries = self.index.load().await?;
        entries.retain(|entry| entry.id != *id);
        self.index.store(&entries).await
    }

    async fn patch_inline(&self, id: &RecordingId, payload: &AudioPayload) -> Result<(), StorageError> {
        let mut entries = self.index.load().await?;
        match entries.iter_mut().find(|entry| entry.id == *id) {
            Some(entry) => {
                entry.data = Some(payload.to_data_uri());
                self.index.store(&entries).await
            }
            // Entry vanished between append and patch; nothing to do
            None => Ok(()),
        }
    }

    async fn resolve(&self, entry: &RecordingMetadata) -> Option<AudioPayload> {
        match self.blobs.get(&entry.id).await {
            Ok(Some(payload)) => return Some(payload),
            Ok(None) => {}
            // A failing blob store reads as absence; the fallback below
            // may still resolve the entry
            Err(err) => debug!("blob lookup failed for {}: {err}", entry.id),
        }

        let uri = entry.data.as_deref()?;
        match AudioPayload::from_data_uri(uri) {
            Ok(payload) => Some(payload),
            Err(err) => {
                warn!("inline payload for {} is undecodable: {err}", entry.id);
                None
            }
        }
    }
}

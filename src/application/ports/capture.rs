//! Capture port interfaces

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::recording::AudioMimeType;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("No audio input device available")]
    DeviceUnavailable,

    #[error("Capture interrupted: {0}")]
    Interrupted(String),

    #[error("Encoder does not support pausing")]
    PauseUnsupported,

    #[error("Capture failed: {0}")]
    Failed(String),
}

/// One incrementally emitted fragment of encoded audio.
///
/// Chunks arrive in emission order over the capture channel and are
/// concatenated unchanged at finalize time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk(pub Vec<u8>);

impl Chunk {
    /// Whether the fragment carries no data
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Control surface for an open capture.
///
/// Implementations forward to the underlying device/encoder. All methods
/// are synchronous signals; chunk delivery stays on the channel.
pub trait CaptureControl: Send {
    /// Suspend chunk emission. Returns [`CaptureError::PauseUnsupported`]
    /// when the encoder cannot pause; the session then degrades to a
    /// display-only pause and keeps accepting chunks so no audio is lost.
    fn pause(&mut self) -> Result<(), CaptureError>;

    /// Resume chunk emission after a successful pause
    fn resume(&mut self) -> Result<(), CaptureError>;

    /// Stop chunk emission. After this returns no further chunks are
    /// produced and the chunk channel closes once in-flight fragments
    /// have been delivered.
    fn stop(&mut self);

    /// Release the underlying device/tracks. Idempotent; called on every
    /// exit path, whether or not finalize ran.
    fn release(&mut self);
}

/// A capture opened by a [`ChunkSource`]: the negotiated container type,
/// the ordered chunk channel, and the control surface.
pub struct ActiveCapture {
    pub mime_type: AudioMimeType,
    pub chunks: mpsc::UnboundedReceiver<Chunk>,
    pub control: Box<dyn CaptureControl>,
}

/// Port for opening microphone capture with chunked emission
#[async_trait]
pub trait ChunkSource: Send + Sync {
    /// Request microphone access and begin chunked capture.
    ///
    /// # Returns
    /// The active capture, or [`CaptureError::PermissionDenied`] /
    /// [`CaptureError::DeviceUnavailable`] when the device cannot be
    /// acquired.
    async fn open(&self) -> Result<ActiveCapture, CaptureError>;
}

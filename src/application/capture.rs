//! Capture session
//!
//! Owns one open microphone capture: the ordered chunk queue, the pause
//! state, and the device control surface. Exactly one session exists per
//! recording; the recorder use case creates it on start and consumes it
//! on stop or interruption.

use tracing::{debug, warn};

use crate::domain::recording::{AudioMimeType, AudioPayload};

use super::ports::{ActiveCapture, CaptureControl, CaptureError, Chunk};

/// An open capture session.
///
/// Chunks are buffered in emission order on the capture channel and are
/// only consumed at finalize time, after the encoder has been told to
/// stop, so the concatenation never races in-flight emission.
pub struct CaptureSession {
    mime_type: AudioMimeType,
    chunks: tokio::sync::mpsc::UnboundedReceiver<Chunk>,
    control: Box<dyn CaptureControl>,
    degraded_pause: bool,
}

impl CaptureSession {
    /// Wrap a capture opened by a [`super::ports::ChunkSource`]
    pub fn new(capture: ActiveCapture) -> Self {
        Self {
            mime_type: capture.mime_type,
            chunks: capture.chunks,
            control: capture.control,
            degraded_pause: false,
        }
    }

    /// The container MIME type negotiated at open time
    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    /// Suspend the underlying encoder.
    ///
    /// When the encoder cannot pause, the session degrades to a
    /// display-only pause: capture keeps running so no audio is silently
    /// dropped while the recorder believes itself paused.
    pub fn pause(&mut self) -> Result<(), CaptureError> {
        match self.control.pause() {
            Ok(()) => Ok(()),
            Err(CaptureError::PauseUnsupported) => {
                warn!("encoder cannot pause; capture continues, display tick suspended");
                self.degraded_pause = true;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Resume the underlying encoder after a pause
    pub fn resume(&mut self) -> Result<(), CaptureError> {
        if self.degraded_pause {
            self.degraded_pause = false;
            return Ok(());
        }
        self.control.resume()
    }

    /// Stop capture and concatenate all buffered chunks into one payload.
    ///
    /// Drains any in-flight chunks until the capture channel closes, so
    /// emission order is preserved exactly and nothing is lost to a late
    /// callback. The device is released before this returns. A session
    /// with zero emitted chunks finalizes to a valid empty payload.
    pub async fn finalize(mut self) -> AudioPayload {
        self.control.stop();

        let mut data = Vec::new();
        let mut count = 0usize;
        while let Some(chunk) = self.chunks.recv().await {
            if chunk.is_empty() {
                continue;
            }
            data.extend_from_slice(&chunk.0);
            count += 1;
        }

        self.control.release();
        debug!(chunks = count, bytes = data.len(), "capture finalized");

        AudioPayload::new(data, self.mime_type)
    }

    /// Tear the session down without producing a payload.
    /// Used when capture is interrupted mid-recording; any partial
    /// buffer is discarded and the device is released.
    pub fn discard(mut self) {
        self.control.stop();
        self.control.release();
        debug!("capture session discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    struct FakeControl {
        tx: Option<mpsc::UnboundedSender<Chunk>>,
        pause_unsupported: bool,
        releases: Arc<AtomicUsize>,
    }

    impl CaptureControl for FakeControl {
        fn pause(&mut self) -> Result<(), CaptureError> {
            if self.pause_unsupported {
                Err(CaptureError::PauseUnsupported)
            } else {
                Ok(())
            }
        }

        fn resume(&mut self) -> Result<(), CaptureError> {
            Ok(())
        }

        fn stop(&mut self) {
            self.tx = None;
        }

        fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn open_fake(
        pause_unsupported: bool,
    ) -> (CaptureSession, mpsc::UnboundedSender<Chunk>, Arc<AtomicUsize>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let releases = Arc::new(AtomicUsize::new(0));
        let session = CaptureSession::new(ActiveCapture {
            mime_type: AudioMimeType::Webm,
            chunks: rx,
            control: Box::new(FakeControl {
                tx: Some(tx.clone()),
                pause_unsupported,
                releases: Arc::clone(&releases),
            }),
        });
        (session, tx, releases)
    }

    #[tokio::test]
    async fn finalize_preserves_emission_order() {
        let (session, tx, releases) = open_fake(false);
        tx.send(Chunk(vec![1, 2])).unwrap();
        tx.send(Chunk(vec![3])).unwrap();
        tx.send(Chunk(vec![4, 5, 6])).unwrap();
        drop(tx);

        let payload = session.finalize().await;
        assert_eq!(payload.data(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(payload.mime_type(), AudioMimeType::Webm);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn finalize_skips_empty_chunks() {
        let (session, tx, _) = open_fake(false);
        tx.send(Chunk(vec![])).unwrap();
        tx.send(Chunk(vec![7])).unwrap();
        drop(tx);

        let payload = session.finalize().await;
        assert_eq!(payload.data(), &[7]);
    }

    #[tokio::test]
    async fn zero_chunk_session_finalizes_to_empty_payload() {
        let (session, tx, releases) = open_fake(false);
        drop(tx);

        let payload = session.finalize().await;
        assert!(payload.is_empty());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn degraded_pause_keeps_accepting_chunks() {
        let (mut session, tx, _) = open_fake(true);

        session.pause().unwrap();
        // Encoder could not pause: chunks emitted now must survive
        tx.send(Chunk(vec![9])).unwrap();
        session.resume().unwrap();
        tx.send(Chunk(vec![10])).unwrap();
        drop(tx);

        let payload = session.finalize().await;
        assert_eq!(payload.data(), &[9, 10]);
    }

    #[tokio::test]
    async fn discard_releases_device() {
        let (session, tx, releases) = open_fake(false);
        tx.send(Chunk(vec![1])).unwrap();
        drop(tx);

        session.discard();
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }
}

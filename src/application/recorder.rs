//! Recorder use case
//!
//! Coordinates the capture session, the recording library, and the UI
//! event sink behind the start/pause/resume/stop intents. Holds the one
//! recorder state machine; guard conditions here make repeated intents
//! idempotent no-ops rather than errors.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration as TokioDuration, Instant};
use tracing::{debug, error, info, warn};

use crate::domain::recorder::{InvalidStateTransition, RecorderSession, RecorderState};
use crate::domain::recording::{Elapsed, RecordingId, RecordingMetadata};

use super::capture::CaptureSession;
use super::library::RecordingLibrary;
use super::ports::{
    BlobStore, CaptureError, ChunkSource, MetadataIndex, RecorderErrorKind, RecorderEvents,
    RecorderStatus, StorageError, VisualizationMode,
};

/// Errors from the recorder use case
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Mutable recorder state, guarded by one lock so every transition is
/// applied fully between suspension points.
struct Inner {
    session: RecorderSession,
    capture: Option<CaptureSession>,
    started_at: Option<Instant>,
    displayed: Elapsed,
    tick: Option<JoinHandle<()>>,
    mode: VisualizationMode,
}

/// Recorder use case: the recording lifecycle state machine
pub struct Recorder<S, M, B, E>
where
    S: ChunkSource,
    M: MetadataIndex,
    B: BlobStore,
    E: RecorderEvents,
{
    source: S,
    library: Arc<RecordingLibrary<M, B>>,
    events: Arc<E>,
    inner: Arc<Mutex<Inner>>,
}

impl<S, M, B, E> Recorder<S, M, B, E>
where
    S: ChunkSource,
    M: MetadataIndex + 'static,
    B: BlobStore + 'static,
    E: RecorderEvents + 'static,
{
    /// Create a new idle recorder
    pub fn new(source: S, library: Arc<RecordingLibrary<M, B>>, events: Arc<E>) -> Self {
        Self {
            source,
            library,
            events,
            inner: Arc::new(Mutex::new(Inner {
                session: RecorderSession::new(),
                capture: None,
                started_at: None,
                displayed: Elapsed::zero(),
                tick: None,
                mode: VisualizationMode::default(),
            })),
        }
    }

    /// Get the current recorder state
    pub async fn state(&self) -> RecorderState {
        self.inner.lock().await.session.state()
    }

    /// Get the currently displayed elapsed time
    pub async fn elapsed(&self) -> Elapsed {
        self.inner.lock().await.displayed
    }

    /// Get the selected visualization mode
    pub async fn visualization_mode(&self) -> VisualizationMode {
        self.inner.lock().await.mode
    }

    /// Select the visualization mode for subsequent frames
    pub async fn set_visualization_mode(&self, mode: VisualizationMode) {
        self.inner.lock().await.mode = mode;
    }

    /// Start a new recording. No-op when already recording or paused.
    ///
    /// On microphone failure the recorder stays idle and the error kind
    /// is surfaced through the event sink.
    pub async fn start(&self) -> Result<(), RecorderError> {
        // The lock is held across the permission request so a second
        // start cannot slip past the guard while we await the device.
        let mut inner = self.inner.lock().await;
        if !inner.session.is_idle() {
            debug!(state = %inner.session.state(), "start ignored");
            return Ok(());
        }

        match self.source.open().await {
            Ok(active) => {
                inner.session.begin_recording()?;
                inner.capture = Some(CaptureSession::new(active));
                inner.started_at = Some(Instant::now());
                inner.displayed = Elapsed::zero();
                self.spawn_tick(&mut inner);
                info!("recording started");
                self.events
                    .status_changed(RecorderStatus::ok(RecorderState::Recording));
                Ok(())
            }
            Err(err) => {
                warn!("could not access microphone: {err}");
                self.events.status_changed(RecorderStatus::error(
                    RecorderState::Idle,
                    RecorderErrorKind::from(&err),
                ));
                Err(err.into())
            }
        }
    }

    /// Pause the running recording. No-op unless currently recording.
    pub async fn pause(&self) -> Result<(), RecorderError> {
        let mut inner = self.inner.lock().await;
        if !inner.session.is_recording() {
            debug!(state = %inner.session.state(), "pause ignored");
            return Ok(());
        }

        if let Some(capture) = inner.capture.as_mut() {
            if let Err(err) = capture.pause() {
                return self.interrupted(&mut inner, err);
            }
        }

        inner.session.pause()?;
        if let Some(tick) = inner.tick.take() {
            tick.abort();
        }
        info!("recording paused");
        self.events
            .status_changed(RecorderStatus::ok(RecorderState::Paused));
        Ok(())
    }

    /// Resume a paused recording. No-op unless currently paused.
    pub async fn resume(&self) -> Result<(), RecorderError> {
        let mut inner = self.inner.lock().await;
        if !inner.session.is_paused() {
            debug!(state = %inner.session.state(), "resume ignored");
            return Ok(());
        }

        if let Some(capture) = inner.capture.as_mut() {
            if let Err(err) = capture.resume() {
                return self.interrupted(&mut inner, err);
            }
        }

        inner.session.resume()?;
        self.spawn_tick(&mut inner);
        info!("recording resumed");
        self.events
            .status_changed(RecorderStatus::ok(RecorderState::Recording));
        Ok(())
    }

    /// Stop the recording and persist it. No-op when idle.
    ///
    /// The device is released unconditionally; the stored duration is the
    /// elapsed string displayed at the moment stop was invoked. Storage
    /// failures are logged and surfaced as status events but never keep
    /// the recorder from returning to idle.
    pub async fn stop(&self) -> Result<Option<RecordingMetadata>, RecorderError> {
        let mut inner = self.inner.lock().await;
        if inner.session.is_idle() {
            debug!("stop ignored: recorder is idle");
            return Ok(None);
        }

        inner.session.begin_finalizing()?;
        if let Some(tick) = inner.tick.take() {
            tick.abort();
        }
        let duration = inner.displayed;
        let capture = inner.capture.take();
        inner.started_at = None;
        self.events
            .status_changed(RecorderStatus::ok(RecorderState::Finalizing));

        let saved = match capture {
            Some(capture) => {
                // Finalize is atomic once started: capture has been told
                // to stop and the drain below the session boundary sees
                // every in-flight chunk.
                let payload = capture.finalize().await;
                let metadata = RecordingMetadata::new(RecordingId::generate(), duration);
                info!(
                    id = %metadata.id,
                    duration = %metadata.duration,
                    bytes = payload.size_bytes(),
                    "recording finalized"
                );

                match self.library.save(metadata.clone(), payload).await {
                    Ok(()) => {
                        self.events.recording_list_changed();
                        Some(metadata)
                    }
                    Err(err) => {
                        error!("failed to persist recording {}: {err}", metadata.id);
                        self.events.status_changed(RecorderStatus::error(
                            RecorderState::Finalizing,
                            RecorderErrorKind::from(&err),
                        ));
                        None
                    }
                }
            }
            None => None,
        };

        inner.session.finish()?;
        self.events
            .status_changed(RecorderStatus::ok(RecorderState::Idle));
        Ok(saved)
    }

    /// Combined record/pause intent: start when idle, pause when
    /// recording, resume when paused.
    pub async fn toggle(&self) -> Result<(), RecorderError> {
        match self.state().await {
            RecorderState::Idle => self.start().await,
            RecorderState::Recording => self.pause().await,
            RecorderState::Paused => self.resume().await,
            RecorderState::Finalizing => Ok(()),
        }
    }

    /// Tear down after a mid-session capture failure: discard the partial
    /// session, release the device, and force the state machine to idle.
    fn interrupted(&self, inner: &mut Inner, err: CaptureError) -> Result<(), RecorderError> {
        warn!("capture interrupted: {err}");
        if let Some(tick) = inner.tick.take() {
            tick.abort();
        }
        if let Some(capture) = inner.capture.take() {
            capture.discard();
        }
        inner.started_at = None;
        inner.session.abort()?;
        self.events.status_changed(RecorderStatus::error(
            RecorderState::Idle,
            RecorderErrorKind::CaptureInterrupted,
        ));
        Err(err.into())
    }

    /// Start the 1-second elapsed-time tick.
    ///
    /// The tick is display-only: it derives the shown value from the
    /// session start instant, emits it, and freezes while paused. It is
    /// not authoritative for anything beyond the stored duration string.
    fn spawn_tick(&self, inner: &mut Inner) {
        let shared = Arc::clone(&self.inner);
        let events = Arc::clone(&self.events);
        inner.tick = Some(tokio::spawn(async move {
            let mut ticker = interval(TokioDuration::from_secs(1));
            loop {
                ticker.tick().await;
                let mut inner = shared.lock().await;
                if !inner.session.is_recording() {
                    break;
                }
                if let Some(started_at) = inner.started_at {
                    inner.displayed = Elapsed::from_duration(started_at.elapsed());
                    events.elapsed_tick(inner.displayed);
                }
            }
        }));
    }
}

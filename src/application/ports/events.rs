//! UI event port interface

use std::sync::Arc;

use crate::domain::recorder::RecorderState;
use crate::domain::recording::{Elapsed, RecordingId};

use super::capture::CaptureError;
use super::store::StorageError;

/// Error kinds surfaced to the UI alongside a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderErrorKind {
    PermissionDenied,
    DeviceUnavailable,
    CaptureInterrupted,
    StorageUnavailable,
    StorageQuotaExceeded,
}

impl From<&CaptureError> for RecorderErrorKind {
    fn from(err: &CaptureError) -> Self {
        match err {
            CaptureError::PermissionDenied => Self::PermissionDenied,
            CaptureError::DeviceUnavailable => Self::DeviceUnavailable,
            _ => Self::CaptureInterrupted,
        }
    }
}

impl From<&StorageError> for RecorderErrorKind {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::QuotaExceeded => Self::StorageQuotaExceeded,
            _ => Self::StorageUnavailable,
        }
    }
}

/// A recorder status notification: the current state, plus the error that
/// caused it when the transition was not user-initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderStatus {
    pub state: RecorderState,
    pub error: Option<RecorderErrorKind>,
}

impl RecorderStatus {
    /// A normal status change
    pub fn ok(state: RecorderState) -> Self {
        Self { state, error: None }
    }

    /// A status change caused by an error
    pub fn error(state: RecorderState, kind: RecorderErrorKind) -> Self {
        Self {
            state,
            error: Some(kind),
        }
    }
}

/// Port for events produced for the host UI.
///
/// All methods are fire-and-forget; implementations must not block.
pub trait RecorderEvents: Send + Sync {
    /// The recorder state changed, possibly because of an error
    fn status_changed(&self, status: RecorderStatus);

    /// The elapsed-time display ticked (1-second granularity)
    fn elapsed_tick(&self, elapsed: Elapsed);

    /// The set of persisted recordings changed
    fn recording_list_changed(&self);

    /// Playback progressed for one recording
    fn playback_progress(&self, id: &RecordingId, position_secs: f64, duration_secs: f64);
}

/// Blanket implementation for shared event sinks
impl<E: RecorderEvents + ?Sized> RecorderEvents for Arc<E> {
    fn status_changed(&self, status: RecorderStatus) {
        self.as_ref().status_changed(status);
    }

    fn elapsed_tick(&self, elapsed: Elapsed) {
        self.as_ref().elapsed_tick(elapsed);
    }

    fn recording_list_changed(&self) {
        self.as_ref().recording_list_changed();
    }

    fn playback_progress(&self, id: &RecordingId, position_secs: f64, duration_secs: f64) {
        self.as_ref().playback_progress(id, position_secs, duration_secs);
    }
}

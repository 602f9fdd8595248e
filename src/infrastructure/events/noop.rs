//! No-op event sink

use crate::application::ports::{RecorderEvents, RecorderStatus};
use crate::domain::recording::{Elapsed, RecordingId};

/// Event sink that discards everything
pub struct NoOpEvents;

impl NoOpEvents {
    /// Create a new no-op sink
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderEvents for NoOpEvents {
    fn status_changed(&self, _status: RecorderStatus) {}

    fn elapsed_tick(&self, _elapsed: Elapsed) {}

    fn recording_list_changed(&self) {}

    fn playback_progress(&self, _id: &RecordingId, _position_secs: f64, _duration_secs: f64) {}
}

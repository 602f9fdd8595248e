//! Logging event sink
//!
//! Forwards every UI event to the tracing subscriber. Useful on its own
//! for headless hosts, and as the default sink during development.

use tracing::{debug, info};

use crate::application::ports::{RecorderEvents, RecorderStatus};
use crate::domain::recording::{Elapsed, RecordingId};

/// Event sink that logs all events
pub struct LogEvents;

impl LogEvents {
    /// Create a new logging sink
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderEvents for LogEvents {
    fn status_changed(&self, status: RecorderStatus) {
        match status.error {
            Some(kind) => info!(state = %status.state, error = ?kind, "status changed"),
            None => info!(state = %status.state, "status changed"),
        }
    }

    fn elapsed_tick(&self, elapsed: Elapsed) {
        debug!(%elapsed, "tick");
    }

    fn recording_list_changed(&self) {
        info!("recording list changed");
    }

    fn playback_progress(&self, id: &RecordingId, position_secs: f64, duration_secs: f64) {
        debug!(%id, position_secs, duration_secs, "playback progress");
    }
}

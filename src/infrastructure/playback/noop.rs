//! No-op playback adapter
//!
//! Used when no audio output is available (headless hosts, tests).

use crate::application::ports::{AudioOutput, PlaybackError, PlaybackHandle};
use crate::domain::recording::AudioPayload;

/// No-op audio output whose handles accept every command and report an
/// immediately finished, zero-length stream
pub struct NoOpOutput;

impl NoOpOutput {
    /// Create a new no-op output
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for NoOpOutput {
    fn open(&self, _payload: &AudioPayload) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        Ok(Box::new(NoOpHandle { playing: false }))
    }
}

struct NoOpHandle {
    playing: bool,
}

impl PlaybackHandle for NoOpHandle {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek_to(&mut self, _fraction: f64) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn position_secs(&self) -> f64 {
        0.0
    }

    fn duration_secs(&self) -> Option<f64> {
        Some(0.0)
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn finished(&self) -> bool {
        false
    }
}

//! Playback port interfaces
//!
//! Playback is a thin collaborator: payloads are handed to the host
//! platform's decoder and controlled through a per-recording handle.

use thiserror::Error;

use crate::domain::recording::AudioPayload;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Audio output unavailable: {0}")]
    OutputUnavailable(String),

    #[error("Could not decode payload: {0}")]
    DecodeFailed(String),

    #[error("Seek failed: {0}")]
    SeekFailed(String),
}

/// Control handle for one decoded recording.
///
/// Handles are not `Send`; drive playback from the UI thread that owns
/// the [`crate::application::PlaybackController`].
pub trait PlaybackHandle {
    /// Start or resume playback
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback, keeping the current position
    fn pause(&mut self);

    /// Seek to a fraction of the total duration (0.0..=1.0)
    fn seek_to(&mut self, fraction: f64) -> Result<(), PlaybackError>;

    /// Current position in seconds
    fn position_secs(&self) -> f64;

    /// Total duration in seconds, when the decoder knows it
    fn duration_secs(&self) -> Option<f64>;

    /// Whether playback is currently running
    fn is_playing(&self) -> bool;

    /// Whether playback reached the end
    fn finished(&self) -> bool;
}

/// Port for opening payloads on an audio output
pub trait AudioOutput: Send + Sync {
    /// Decode a payload and return a paused handle for it
    fn open(&self, payload: &AudioPayload) -> Result<Box<dyn PlaybackHandle>, PlaybackError>;
}

/// Blanket implementation for boxed output types
impl AudioOutput for Box<dyn AudioOutput> {
    fn open(&self, payload: &AudioPayload) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        self.as_ref().open(payload)
    }
}

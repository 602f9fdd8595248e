//! Rodio-based playback adapter

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::application::ports::{AudioOutput, PlaybackError, PlaybackHandle};
use crate::domain::recording::AudioPayload;

/// Audio output using rodio's default device
pub struct RodioOutput;

impl RodioOutput {
    /// Create a new rodio output
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for RodioOutput {
    fn open(&self, payload: &AudioPayload) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::OutputUnavailable(e.to_string()))?;

        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| PlaybackError::OutputUnavailable(e.to_string()))?;

        let cursor = Cursor::new(payload.data().to_vec());
        let decoder =
            Decoder::new(cursor).map_err(|e| PlaybackError::DecodeFailed(e.to_string()))?;
        let duration = decoder.total_duration();

        // Handles start paused; the controller decides when to play
        sink.append(decoder);
        sink.pause();

        Ok(Box::new(RodioHandle {
            _stream: stream,
            sink,
            duration,
        }))
    }
}

/// One decoded recording on a rodio sink
struct RodioHandle {
    // Keeps the output stream alive for the lifetime of the sink
    _stream: OutputStream,
    sink: Sink,
    duration: Option<Duration>,
}

impl PlaybackHandle for RodioHandle {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek_to(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        let total = self
            .duration
            .ok_or_else(|| PlaybackError::SeekFailed("duration unknown".into()))?;
        self.sink
            .try_seek(total.mul_f64(fraction))
            .map_err(|e| PlaybackError::SeekFailed(e.to_string()))
    }

    fn position_secs(&self) -> f64 {
        self.sink.get_pos().as_secs_f64()
    }

    fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn finished(&self) -> bool {
        self.sink.empty()
    }
}

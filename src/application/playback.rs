//! Playback controller
//!
//! Thin coordinator over per-recording playback handles. Its one rule:
//! at most one recording plays at a time across the whole list; starting
//! playback on one pauses any other that is currently playing.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::recording::{AudioPayload, RecordingId};

use super::ports::{AudioOutput, PlaybackError, PlaybackHandle, RecorderEvents};

/// Progress readout for one recording
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackProgress {
    pub position_secs: f64,
    pub duration_secs: Option<f64>,
}

impl PlaybackProgress {
    /// Played fraction of the total duration, when the duration is known
    pub fn fraction(&self) -> Option<f64> {
        match self.duration_secs {
            Some(total) if total > 0.0 => Some((self.position_secs / total).clamp(0.0, 1.0)),
            _ => None,
        }
    }
}

/// Playback over a list of recordings, one actively playing at most
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    handles: HashMap<RecordingId, Box<dyn PlaybackHandle>>,
    active: Option<RecordingId>,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// Create a controller over an audio output
    pub fn new(output: O) -> Self {
        Self {
            output,
            handles: HashMap::new(),
            active: None,
        }
    }

    /// The recording currently playing, if any
    pub fn active(&self) -> Option<&RecordingId> {
        self.active.as_ref()
    }

    /// Whether the given recording is the one currently playing
    pub fn is_playing(&self, id: &RecordingId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// Start or resume playback of one recording, pausing whichever other
    /// recording is currently playing. The payload is decoded lazily on
    /// first play and the handle is kept for later resume/seek.
    pub fn play(&mut self, id: &RecordingId, payload: &AudioPayload) -> Result<(), PlaybackError> {
        if let Some(current) = self.active.take() {
            if current != *id {
                if let Some(handle) = self.handles.get_mut(&current) {
                    debug!("pausing {current} to play {id}");
                    handle.pause();
                }
            }
        }

        if !self.handles.contains_key(id) {
            let handle = self.output.open(payload)?;
            self.handles.insert(id.clone(), handle);
        }

        if let Some(handle) = self.handles.get_mut(id) {
            handle.play()?;
        }
        self.active = Some(id.clone());
        Ok(())
    }

    /// Pause playback of one recording, keeping its position
    pub fn pause(&mut self, id: &RecordingId) {
        if let Some(handle) = self.handles.get_mut(id) {
            handle.pause();
        }
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
    }

    /// Play/pause toggle for one recording
    pub fn toggle(&mut self, id: &RecordingId, payload: &AudioPayload) -> Result<(), PlaybackError> {
        if self.is_playing(id) {
            self.pause(id);
            Ok(())
        } else {
            self.play(id, payload)
        }
    }

    /// Seek one recording to a fraction of its duration.
    /// The fraction is clamped to `0.0..=1.0`.
    pub fn seek(&mut self, id: &RecordingId, fraction: f64) -> Result<(), PlaybackError> {
        match self.handles.get_mut(id) {
            Some(handle) => handle.seek_to(fraction.clamp(0.0, 1.0)),
            None => Ok(()),
        }
    }

    /// Progress readout for one opened recording
    pub fn progress(&self, id: &RecordingId) -> Option<PlaybackProgress> {
        self.handles.get(id).map(|handle| PlaybackProgress {
            position_secs: handle.position_secs(),
            duration_secs: handle.duration_secs(),
        })
    }

    /// Emit progress for the active recording and reap finished handles.
    /// Call once per UI refresh.
    pub fn poll<E: RecorderEvents + ?Sized>(&mut self, events: &E) {
        if let Some(id) = self.active.clone() {
            if let Some(handle) = self.handles.get(&id) {
                if let Some(duration) = handle.duration_secs() {
                    events.playback_progress(&id, handle.position_secs(), duration);
                }
            }
        }

        let finished: Vec<RecordingId> = self
            .handles
            .iter()
            .filter(|(_, handle)| handle.finished())
            .map(|(id, _)| id.clone())
            .collect();

        for id in finished {
            debug!("playback of {id} finished");
            self.handles.remove(&id);
            if self.active.as_ref() == Some(&id) {
                self.active = None;
            }
        }
    }
}

//! Recorder session state machine

use std::fmt;
use thiserror::Error;

/// Recorder states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Paused,
    Finalizing,
}

impl RecorderState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Paused => "paused",
            Self::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: RecorderState,
    pub action: String,
}

impl InvalidStateTransition {
    fn new(current_state: RecorderState, action: &str) -> Self {
        Self {
            current_state,
            action: action.to_string(),
        }
    }
}

/// Recorder session entity.
/// Manages state transitions for one recorder's lifecycle.
///
/// State machine:
///   IDLE -> RECORDING (begin_recording)
///   RECORDING -> PAUSED (pause)
///   PAUSED -> RECORDING (resume)
///   RECORDING | PAUSED -> FINALIZING (begin_finalizing)
///   FINALIZING -> IDLE (finish)
///   RECORDING | PAUSED -> IDLE (abort, capture interruption)
///
/// The transitions are strict; idempotent no-op handling of repeated
/// intents (a second start while recording, a pause while paused) is the
/// caller's responsibility and is guarded by the state accessors.
#[derive(Debug, Default)]
pub struct RecorderSession {
    state: RecorderState,
}

impl RecorderSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == RecorderState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Check if currently paused
    pub fn is_paused(&self) -> bool {
        self.state == RecorderState::Paused
    }

    /// Check if a capture session is open (recording or paused)
    pub fn is_capturing(&self) -> bool {
        self.is_recording() || self.is_paused()
    }

    /// Transition from IDLE to RECORDING
    pub fn begin_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecorderState::Idle {
            return Err(InvalidStateTransition::new(self.state, "start recording"));
        }
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to PAUSED
    pub fn pause(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecorderState::Recording {
            return Err(InvalidStateTransition::new(self.state, "pause"));
        }
        self.state = RecorderState::Paused;
        Ok(())
    }

    /// Transition from PAUSED to RECORDING
    pub fn resume(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecorderState::Paused {
            return Err(InvalidStateTransition::new(self.state, "resume"));
        }
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// Transition from RECORDING or PAUSED to FINALIZING
    pub fn begin_finalizing(&mut self) -> Result<(), InvalidStateTransition> {
        if !self.is_capturing() {
            return Err(InvalidStateTransition::new(self.state, "stop recording"));
        }
        self.state = RecorderState::Finalizing;
        Ok(())
    }

    /// Transition from FINALIZING to IDLE
    pub fn finish(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecorderState::Finalizing {
            return Err(InvalidStateTransition::new(self.state, "finish"));
        }
        self.state = RecorderState::Idle;
        Ok(())
    }

    /// Transition from RECORDING or PAUSED to IDLE after a capture
    /// interruption. The partial session is discarded.
    pub fn abort(&mut self) -> Result<(), InvalidStateTransition> {
        if !self.is_capturing() {
            return Err(InvalidStateTransition::new(self.state, "abort"));
        }
        self.state = RecorderState::Idle;
        Ok(())
    }
}

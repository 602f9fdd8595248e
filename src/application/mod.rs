//! Application layer - Use cases and port interfaces
//!
//! Contains the core recording operations and trait definitions
//! for external system interactions.

pub mod capture;
pub mod library;
pub mod playback;
pub mod ports;
pub mod recorder;

// Re-export use cases
pub use capture::CaptureSession;
pub use library::{RecordingLibrary, ResolvedRecording};
pub use playback::{PlaybackController, PlaybackProgress};
pub use recorder::{Recorder, RecorderError};

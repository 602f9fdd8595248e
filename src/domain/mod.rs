//! Domain layer - Core business logic
//!
//! Contains value objects, the recorder state machine entity, and domain
//! errors. This layer has no dependencies on external systems.

pub mod error;
pub mod recorder;
pub mod recording;

// Re-export common types
pub use error::*;
pub use recorder::{InvalidStateTransition, RecorderSession, RecorderState};
pub use recording::{
    AudioMimeType, AudioPayload, Elapsed, RecordingId, RecordingMetadata,
};

//! Recording value objects

pub mod elapsed;
pub mod metadata;
pub mod payload;

pub use elapsed::Elapsed;
pub use metadata::{RecordingId, RecordingMetadata};
pub use payload::{AudioMimeType, AudioPayload};

//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod events;
pub mod playback;
pub mod store;
pub mod visualizer;

// Re-export common types
pub use capture::{ActiveCapture, CaptureControl, CaptureError, Chunk, ChunkSource};
pub use events::{RecorderErrorKind, RecorderEvents, RecorderStatus};
pub use playback::{AudioOutput, PlaybackError, PlaybackHandle};
pub use store::{BlobStore, MetadataIndex, StorageError};
pub use visualizer::{SampleBuffer, VisualizationMode, Visualizer};

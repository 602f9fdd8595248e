//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, rodio, and the local filesystem.

pub mod capture;
pub mod events;
pub mod playback;
pub mod storage;

// Re-export adapters
pub use capture::CpalMicrophone;
pub use events::{ChannelEvents, LogEvents, NoOpEvents, RecorderEvent};
pub use playback::{NoOpOutput, RodioOutput};
pub use storage::{DirBlobStore, JsonFileIndex, SCHEMA_VERSION};

use std::path::PathBuf;

/// Default data directory for the recording index and blob container
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("voicebooth")
}

//! Playback infrastructure adapters

mod noop;
mod rodio;

pub use noop::NoOpOutput;
pub use self::rodio::RodioOutput;

use crate::application::ports::AudioOutput;

/// Create a playback output, falling back to no-op when disabled
pub fn create_output(enabled: bool) -> Box<dyn AudioOutput> {
    if enabled {
        Box::new(RodioOutput::new())
    } else {
        Box::new(NoOpOutput::new())
    }
}

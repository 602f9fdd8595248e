//! Event sink infrastructure adapters

mod channel;
mod log;
mod noop;

pub use channel::{ChannelEvents, RecorderEvent};
pub use log::LogEvents;
pub use noop::NoOpEvents;

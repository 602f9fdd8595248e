//! Recorder state machine entity

pub mod session;

pub use session::{InvalidStateTransition, RecorderSession, RecorderState};

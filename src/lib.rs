//! Voicebooth - voice recorder core
//!
//! This crate provides the recording lifecycle of a local voice recorder:
//! microphone capture with chunked buffering, durable persistence of
//! recordings across a metadata index and a blob store (with graceful
//! degradation), and per-recording playback.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the recorder state machine, and domain errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, filesystem stores)
//!
//! The host UI drives the [`application::Recorder`] with intents
//! (start/pause/resume/stop) and observes it through the
//! [`application::ports::RecorderEvents`] port.

pub mod application;
pub mod domain;
pub mod infrastructure;

//! Capture infrastructure adapters

mod cpal_mic;

pub use cpal_mic::CpalMicrophone;

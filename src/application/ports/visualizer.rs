//! Visualization port interface
//!
//! Rendering itself is presentation detail and lives with the host UI;
//! the core only selects the mode and hands over sample buffers.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidVisualizationMode;

/// Number of bins delivered per sample buffer (half the analyser FFT size)
pub const SAMPLE_BUFFER_LEN: usize = 1024;

/// Available visualization modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualizationMode {
    #[default]
    Waveform,
    Frequency,
    Circular,
}

impl VisualizationMode {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waveform => "waveform",
            Self::Frequency => "frequency",
            Self::Circular => "circular",
        }
    }

    /// Whether this mode consumes frequency-domain data
    /// (waveform consumes time-domain data)
    pub const fn is_frequency_domain(&self) -> bool {
        matches!(self, Self::Frequency | Self::Circular)
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VisualizationMode {
    type Err = InvalidVisualizationMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "waveform" => Ok(Self::Waveform),
            "frequency" => Ok(Self::Frequency),
            "circular" => Ok(Self::Circular),
            _ => Err(InvalidVisualizationMode {
                input: s.to_string(),
            }),
        }
    }
}

/// One analyser snapshot, produced per display refresh while recording.
/// Values are byte-normalized (0..=255) as delivered by the analyser tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    pub samples: Vec<u8>,
}

impl SampleBuffer {
    /// Wrap an analyser snapshot
    pub fn new(samples: Vec<u8>) -> Self {
        Self { samples }
    }
}

/// Port for pure rendering of a sample buffer.
/// No state is retained between frames beyond the selected mode.
pub trait Visualizer: Send + Sync {
    /// Draw one frame for the given mode
    fn render(&self, mode: VisualizationMode, buffer: &SampleBuffer);
}

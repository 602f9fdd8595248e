//! Domain error types

use thiserror::Error;

/// Error when parsing an elapsed-time string
#[derive(Debug, Clone, Error)]
#[error("Invalid elapsed time: \"{input}\". Expected format: mm:ss (e.g., 01:30)")]
pub struct ElapsedParseError {
    pub input: String,
}

/// Error when decoding an inline fallback payload
#[derive(Debug, Clone, Error)]
pub enum DataUriError {
    #[error("Not a data URI: missing \"data:\" prefix")]
    MissingScheme,

    #[error("Malformed data URI: expected \"data:<mime>;base64,<payload>\"")]
    MalformedHeader,

    #[error("Unknown audio MIME type: \"{0}\"")]
    UnknownMimeType(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Error when parsing a visualization mode name
#[derive(Debug, Clone, Error)]
#[error("Invalid visualization mode: \"{input}\". Valid modes are: waveform, frequency, circular")]
pub struct InvalidVisualizationMode {
    pub input: String,
}

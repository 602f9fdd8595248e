//! Audio payload value object

use std::fmt;

use base64::Engine;

use crate::domain::error::DataUriError;

/// Supported audio container MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioMimeType {
    Webm,
    Ogg,
    Wav,
    Pcm,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
            Self::Pcm => "audio/pcm",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    /// Look up a MIME type from its string form.
    /// Parameters after `;` (e.g. `audio/webm;codecs=opus`) are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let base = mime.split(';').next().unwrap_or(mime).trim();
        match base {
            "audio/webm" => Some(Self::Webm),
            "audio/ogg" => Some(Self::Ogg),
            "audio/wav" | "audio/wave" | "audio/x-wav" => Some(Self::Wav),
            "audio/pcm" | "audio/l16" => Some(Self::Pcm),
            _ => None,
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for AudioMimeType {
    fn default() -> Self {
        Self::Webm
    }
}

/// Value object for one finalized recording: the complete audio bytes plus
/// the container MIME type negotiated by the capture encoder.
///
/// An empty payload is valid; a session stopped before any chunk was
/// emitted still finalizes to a (zero-byte) payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    data: Vec<u8>,
    mime_type: AudioMimeType,
}

impl AudioPayload {
    /// Create a payload from raw bytes
    pub fn new(data: Vec<u8>, mime_type: AudioMimeType) -> Self {
        Self { data, mime_type }
    }

    /// Create an empty payload
    pub fn empty(mime_type: AudioMimeType) -> Self {
        Self::new(Vec::new(), mime_type)
    }

    /// Get the raw audio bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload holds no audio data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encode as a self-describing data URI (`data:<mime>;base64,<payload>`).
    ///
    /// This is the fallback representation embedded in the metadata index
    /// when the blob store is unavailable.
    pub fn to_data_uri(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime_type.as_str(), b64)
    }

    /// Decode a data URI produced by [`AudioPayload::to_data_uri`]
    pub fn from_data_uri(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (header, b64) = rest.split_once(',').ok_or(DataUriError::MalformedHeader)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(DataUriError::MalformedHeader)?;

        let mime_type = AudioMimeType::from_mime(mime)
            .ok_or_else(|| DataUriError::UnknownMimeType(mime.to_string()))?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))?;

        Ok(Self::new(data, mime_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_as_str() {
        assert_eq!(AudioMimeType::Webm.as_str(), "audio/webm");
        assert_eq!(AudioMimeType::Ogg.as_str(), "audio/ogg");
        assert_eq!(AudioMimeType::Wav.as_str(), "audio/wav");
        assert_eq!(AudioMimeType::Pcm.as_str(), "audio/pcm");
    }

    #[test]
    fn mime_type_lookup_ignores_parameters() {
        assert_eq!(
            AudioMimeType::from_mime("audio/webm;codecs=opus"),
            Some(AudioMimeType::Webm)
        );
        assert_eq!(AudioMimeType::from_mime("audio/x-wav"), Some(AudioMimeType::Wav));
        assert_eq!(AudioMimeType::from_mime("video/webm"), None);
    }

    #[test]
    fn default_mime_type_is_webm() {
        assert_eq!(AudioMimeType::default(), AudioMimeType::Webm);
    }

    #[test]
    fn data_uri_round_trip() {
        let payload = AudioPayload::new(vec![0x00, 0x01, 0xfe, 0xff], AudioMimeType::Webm);
        let uri = payload.to_data_uri();
        assert!(uri.starts_with("data:audio/webm;base64,"));

        let back = AudioPayload::from_data_uri(&uri).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn empty_payload_round_trips() {
        let payload = AudioPayload::empty(AudioMimeType::Ogg);
        assert!(payload.is_empty());

        let back = AudioPayload::from_data_uri(&payload.to_data_uri()).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn data_uri_rejects_malformed_input() {
        assert!(matches!(
            AudioPayload::from_data_uri("audio/webm;base64,AAAA"),
            Err(DataUriError::MissingScheme)
        ));
        assert!(matches!(
            AudioPayload::from_data_uri("data:audio/webm;base64"),
            Err(DataUriError::MalformedHeader)
        ));
        assert!(matches!(
            AudioPayload::from_data_uri("data:audio/webm,AAAA"),
            Err(DataUriError::MalformedHeader)
        ));
        assert!(matches!(
            AudioPayload::from_data_uri("data:text/plain;base64,AAAA"),
            Err(DataUriError::UnknownMimeType(_))
        ));
        assert!(matches!(
            AudioPayload::from_data_uri("data:audio/webm;base64,@@@@"),
            Err(DataUriError::InvalidBase64(_))
        ));
    }
}

//! Recording metadata entity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Elapsed;

/// Opaque unique identifier for a recording.
///
/// Assigned at finalize time from the epoch-millisecond clock, so ids are
/// stable storage keys and sort in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordingId(String);

impl RecordingId {
    /// Wrap an existing id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh id from the current time
    pub fn generate() -> Self {
        Self(Utc::now().timestamp_millis().to_string())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in the persisted recording index.
///
/// `duration` is the display string captured at the moment the recording
/// was stopped; it is never re-derived from the payload. `data` carries the
/// inline fallback payload when the blob store was unavailable at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub id: RecordingId,
    pub timestamp: DateTime<Utc>,
    pub duration: Elapsed,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl RecordingMetadata {
    /// Create a metadata entry stamped with the current time
    pub fn new(id: RecordingId, duration: Elapsed) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            duration,
            data: None,
        }
    }

    /// Whether this entry carries an inline fallback payload
    pub fn has_inline_payload(&self) -> bool {
        self.data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_numeric_strings() {
        let id = RecordingId::generate();
        assert!(id.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn serializes_with_original_field_names() {
        let entry = RecordingMetadata::new(RecordingId::new("1700000000000"), Elapsed::from_secs(65));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["duration"], "01:05");
        assert!(json["timestamp"].is_string());
        // No inline payload: the field is omitted entirely
        assert!(json.get("data").is_none());
    }

    #[test]
    fn deserializes_entry_without_data_field() {
        let json = r#"{"id":"123","timestamp":"2024-01-01T00:00:00Z","duration":"00:42"}"#;
        let entry: RecordingMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id.as_str(), "123");
        assert_eq!(entry.duration.as_secs(), 42);
        assert!(!entry.has_inline_payload());
    }

    #[test]
    fn preserves_inline_payload_field() {
        let mut entry = RecordingMetadata::new(RecordingId::new("9"), Elapsed::zero());
        entry.data = Some("data:audio/webm;base64,AAAA".to_string());

        let json = serde_json::to_string(&entry).unwrap();
        let back: RecordingMetadata = serde_json::from_str(&json).unwrap();

        assert!(back.has_inline_payload());
        assert_eq!(back, entry);
    }
}

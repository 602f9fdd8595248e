//! Elapsed-time value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::domain::error::ElapsedParseError;

/// Value object for the elapsed recording time shown next to the record
/// controls and stored on each recording.
///
/// Renders as a zero-padded `mm:ss` string. Minutes wrap at 60, so the
/// rendered form is a display value, not a lossless duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Elapsed {
    seconds: u64,
}

impl Elapsed {
    /// Zero elapsed time ("00:00")
    pub const fn zero() -> Self {
        Self { seconds: 0 }
    }

    /// Create from whole seconds
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Create from a std duration, truncating to whole seconds
    pub fn from_duration(duration: StdDuration) -> Self {
        Self {
            seconds: duration.as_secs(),
        }
    }

    /// Get the elapsed time in whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = (self.seconds / 60) % 60;
        let seconds = self.seconds % 60;
        write!(f, "{:02}:{:02}", minutes, seconds)
    }
}

impl FromStr for Elapsed {
    type Err = ElapsedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ElapsedParseError {
            input: s.to_string(),
        };

        let (minutes, seconds) = s.trim().split_once(':').ok_or_else(err)?;
        let minutes: u64 = minutes.parse().map_err(|_| err())?;
        let seconds: u64 = seconds.parse().map_err(|_| err())?;

        if seconds >= 60 {
            return Err(err());
        }

        Ok(Self::from_secs(minutes * 60 + seconds))
    }
}

// Persisted as the display string so the stored document matches what the
// user saw at stop time.
impl Serialize for Elapsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Elapsed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

//! Level definitions

use super::class::Class;
use super::error::{EventError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity class used by [`Logger`](super::Logger).
///
/// Lower values are more severe: `Panic` is 0 and `Trace` is 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum Level {
    Panic = 0,
    Fatal = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Trace = 6,
}

const LABELS: [&str; 7] = ["Panic", "Fatal", "Error", "Warning", "Info", "Debug", "Trace"];

/// Label returned for values outside the defined levels
pub const UNKNOWN_LABEL: &str = "Unknown";

impl Level {
    /// Every level, most severe first
    pub const ALL: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    pub fn to_str(&self) -> &'static str {
        LABELS[*self as usize]
    }

    /// Map an integer class value back to a level
    pub fn from_value(value: i64) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Label for an arbitrary class value, `"Unknown"` when out of range
    pub fn label_of(value: i64) -> &'static str {
        Self::from_value(value).map_or(UNKNOWN_LABEL, |level| level.to_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl Class for Level {
    fn value(&self) -> i64 {
        *self as i64
    }
}

impl FromStr for Level {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.to_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EventError::unknown_level(s))
    }
}

/// Parse a level name, ignoring case.
///
/// Only the seven level names are accepted; anything else is an
/// [`EventError::UnknownLevel`] carrying the input.
///
/// ```
/// use rust_event_stream::{parse_level, Level};
///
/// assert_eq!(parse_level("WARNING").unwrap(), Level::Warning);
/// assert!(parse_level("warn").is_err());
/// ```
pub fn parse_level(text: &str) -> Result<Level> {
    text.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_ordinal() {
        for (idx, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.value(), idx as i64);
        }
        assert_eq!(Level::Info.value(), 4);
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(parse_level("INFO").unwrap(), Level::Info);
        assert_eq!(parse_level("info").unwrap(), Level::Info);
        assert_eq!(parse_level("Info").unwrap(), Level::Info);
        assert_eq!(parse_level("tRaCe").unwrap(), Level::Trace);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = parse_level("bogus").unwrap_err();
        assert_eq!(err, EventError::UnknownLevel("bogus".to_string()));
        assert!(err.to_string().contains("bogus"));

        assert!(parse_level("").is_err());
        assert!(parse_level(" info").is_err());
    }

    #[test]
    fn test_label_of_out_of_range() {
        assert_eq!(Level::label_of(3), "Warning");
        assert_eq!(Level::label_of(7), "Unknown");
        assert_eq!(Level::label_of(-1), "Unknown");
        assert_eq!(Level::from_value(100), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Level::Warning).unwrap();
        assert_eq!(json, "\"Warning\"");
        let level: Level = serde_json::from_str("\"Debug\"").unwrap();
        assert_eq!(level, Level::Debug);
    }
}

//! Error types for the event stream core

pub type Result<T> = std::result::Result<T, EventError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// Level name did not match any known level
    #[error("unknown level {0}")]
    UnknownLevel(String),
}

impl EventError {
    /// Create an unknown level error for the offending input
    pub fn unknown_level(input: impl Into<String>) -> Self {
        EventError::UnknownLevel(input.into())
    }
}

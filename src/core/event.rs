//! Event structure

use super::class::Class;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque data carried by an event
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Payload {
    #[default]
    Empty,
    /// Message arguments, as emitted by the logger
    Messages(Vec<String>),
    Bytes(Vec<u8>),
    Value(serde_json::Value),
}

impl Payload {
    /// Message arguments if this payload carries any
    pub fn messages(&self) -> Option<&[String]> {
        match self {
            Payload::Messages(messages) => Some(messages.as_slice()),
            _ => None,
        }
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::Empty
    }
}

impl From<Vec<String>> for Payload {
    fn from(messages: Vec<String>) -> Self {
        Payload::Messages(messages)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Value(value)
    }
}

/// Immutable, timestamped, tagged envelope handed to a [`Stream`](super::Stream).
#[derive(Debug, Clone)]
pub struct Event {
    pub class: Arc<dyn Class>,
    pub timestamp: DateTime<Utc>,
    pub tags: HashMap<String, String>,
    pub data: Payload,
}

impl Event {
    /// Build an event stamped with the current time.
    ///
    /// The tag map is stored as given; callers wanting isolation from a map
    /// they keep mutating must pass a copy.
    pub fn new(
        class: impl Class,
        tags: HashMap<String, String>,
        data: impl Into<Payload>,
    ) -> Self {
        Self::from_shared(Arc::new(class), tags, data)
    }

    /// Build an event from an already shared class
    pub fn from_shared(
        class: Arc<dyn Class>,
        tags: HashMap<String, String>,
        data: impl Into<Payload>,
    ) -> Self {
        Self {
            class,
            timestamp: Utc::now(),
            tags,
            data: data.into(),
        }
    }

    /// Ordering value of the event's class
    #[inline]
    pub fn value(&self) -> i64 {
        self.class.value()
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.class.value() == other.class.value()
            && self.class.label() == other.class.label()
            && self.timestamp == other.timestamp
            && self.tags == other.tags
            && self.data == other.data
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct ClassRepr {
            value: i64,
            label: String,
        }

        let mut state = serializer.serialize_struct("Event", 4)?;
        state.serialize_field(
            "class",
            &ClassRepr {
                value: self.class.value(),
                label: self.class.label(),
            },
        )?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("tags", &self.tags)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

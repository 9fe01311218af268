//! Core event types and traits

pub mod class;
pub mod context;
pub mod error;
pub mod event;
pub mod global;
pub mod level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod stream;

pub use class::{Any, Class};
pub use context::Context;
pub use error::{EventError, Result};
pub use event::{Event, Payload};
pub use level::{parse_level, Level};
pub use logger::{Logger, LoggerBuilder};
pub use message::IntoMessages;
pub use metrics::StreamMetrics;
pub use stream::{Client, Stream};

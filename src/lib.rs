//! # Rust Event Stream
//!
//! A small event-emission runtime: producers build typed, timestamped,
//! tagged events and hand them to a pluggable [`Stream`]; consumers drain
//! the stream without producers knowing how delivery happens.
//!
//! ## Features
//!
//! - **Pluggable Delivery**: [`NoopStream`], blocking [`SyncStream`] and
//!   fire-and-forget [`AsyncStream`]
//! - **Cancellation**: every stream lives inside a [`Context`] scope
//! - **Level Filtering**: [`Logger`] emits one event per call, filtered by a
//!   lock-free threshold
//! - **Best Effort**: delivery failures are silent drops, counted in
//!   [`StreamMetrics`]
//!
//! ```
//! use rust_event_stream::prelude::*;
//! use std::sync::Arc;
//!
//! let stream = Arc::new(SyncStream::new(&Context::background(), 32));
//! let logger = Logger::new().with_tag("component", "db");
//! logger.with_stream(stream.clone());
//!
//! logger.info("connected");
//! logger.error("hidden by the Info threshold");
//!
//! let event = stream.get().recv().unwrap();
//! assert_eq!(event.class.label(), "Info");
//! assert_eq!(event.tag("component"), Some("db"));
//! ```

pub mod core;
pub mod macros;
pub mod streams;

pub use crate::core::global;

pub mod prelude {
    pub use crate::core::{
        parse_level, Any, Class, Client, Context, Event, EventError, IntoMessages, Level,
        Logger, LoggerBuilder, Payload, Result, Stream, StreamMetrics,
    };
    pub use crate::streams::{AsyncStream, NoopStream, Receiver, SyncStream};
}

pub use crate::core::{
    parse_level, Any, Class, Client, Context, Event, EventError, IntoMessages, Level, Logger,
    LoggerBuilder, Payload, Result, Stream, StreamMetrics,
};
pub use crate::streams::{AsyncStream, NoopStream, Receiver, SyncStream};

//! Stream implementations

pub mod async_stream;
pub mod noop;
pub mod sync;

pub use async_stream::AsyncStream;
pub use noop::NoopStream;
pub use sync::SyncStream;

// Re-export the capability traits next to their implementations
pub use crate::core::{Client, Stream};

/// Consumer handle returned by every stream's `get()`
pub use crossbeam_channel::Receiver;

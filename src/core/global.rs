//! Process-wide default logger
//!
//! Library code that does not want to thread a [`Logger`] through its APIs
//! can emit through these functions. Attach a stream once at startup:
//!
//! ```
//! use rust_event_stream::prelude::*;
//! use rust_event_stream::global;
//! use std::sync::Arc;
//!
//! let stream = Arc::new(SyncStream::new(&Context::background(), 8));
//! global::default_logger().with_stream(stream.clone());
//! global::info("service started");
//! ```

use super::logger::Logger;
use super::message::IntoMessages;
use std::sync::LazyLock;

static DEFAULT_LOGGER: LazyLock<Logger> = LazyLock::new(Logger::new);

/// The shared default logger
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

pub fn panic(messages: impl IntoMessages) -> ! {
    DEFAULT_LOGGER.panic(messages)
}

pub fn fatal(messages: impl IntoMessages) -> ! {
    DEFAULT_LOGGER.fatal(messages)
}

pub fn error(messages: impl IntoMessages) {
    DEFAULT_LOGGER.error(messages);
}

pub fn warning(messages: impl IntoMessages) {
    DEFAULT_LOGGER.warning(messages);
}

pub fn info(messages: impl IntoMessages) {
    DEFAULT_LOGGER.info(messages);
}

pub fn debug(messages: impl IntoMessages) {
    DEFAULT_LOGGER.debug(messages);
}

pub fn trace(messages: impl IntoMessages) {
    DEFAULT_LOGGER.trace(messages);
}

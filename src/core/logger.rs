//! Level-filtered logger built on a [`Stream`]

use super::{
    error::Result,
    event::{Event, Payload},
    level::{parse_level, Level},
    message::IntoMessages,
    stream::{Client, Stream},
};
use crate::streams::NoopStream;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Producer that turns log calls into [`Event`]s.
///
/// Each emission copies the logger's tags into a fresh event and forwards it
/// to the attached stream when the event's level value is greater than or
/// equal to the threshold's value. Because `Panic` is 0 and `Trace` is 6,
/// the default `Info` threshold forwards `Info`, `Debug` and `Trace` and
/// drops the more severe levels.
pub struct Logger {
    tags: HashMap<String, String>,
    threshold: AtomicI64,
    stream: Mutex<Arc<dyn Stream>>,
}

impl Logger {
    /// Logger with an `Info` threshold, no tags and a [`NoopStream`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
            threshold: AtomicI64::new(Level::Info as i64),
            stream: Mutex::new(Arc::new(NoopStream)),
        }
    }

    pub fn set_log_level(&self, level: Level) {
        self.threshold.store(level as i64, Ordering::Release);
    }

    pub fn log_level(&self) -> Level {
        Level::from_value(self.threshold.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn tags(&self) -> &HashMap<String, String> {
        &self.tags
    }

    /// Stream currently attached
    pub fn stream(&self) -> Arc<dyn Stream> {
        Arc::clone(&self.stream.lock())
    }

    /// Emit at `level` without any of the `fatal`/`panic` side effects
    pub fn log(&self, level: Level, messages: impl IntoMessages) {
        let event = Event::new(
            level,
            self.tags.clone(),
            Payload::Messages(messages.into_messages()),
        );
        self.send(event);
    }

    fn send(&self, event: Event) {
        if event.value() < self.threshold.load(Ordering::Acquire) {
            return;
        }
        // Release the lock before a possibly blocking send
        let stream = self.stream();
        stream.send(event);
    }

    #[inline]
    pub fn trace(&self, messages: impl IntoMessages) {
        self.log(Level::Trace, messages);
    }

    #[inline]
    pub fn trace_fmt(&self, args: fmt::Arguments<'_>) {
        self.trace(args.to_string());
    }

    #[inline]
    pub fn debug(&self, messages: impl IntoMessages) {
        self.log(Level::Debug, messages);
    }

    #[inline]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.debug(args.to_string());
    }

    #[inline]
    pub fn info(&self, messages: impl IntoMessages) {
        self.log(Level::Info, messages);
    }

    #[inline]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.info(args.to_string());
    }

    #[inline]
    pub fn warning(&self, messages: impl IntoMessages) {
        self.log(Level::Warning, messages);
    }

    #[inline]
    pub fn warning_fmt(&self, args: fmt::Arguments<'_>) {
        self.warning(args.to_string());
    }

    #[inline]
    pub fn error(&self, messages: impl IntoMessages) {
        self.log(Level::Error, messages);
    }

    #[inline]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.error(args.to_string());
    }

    /// Emit at `Fatal`, then exit the process with status 1
    pub fn fatal(&self, messages: impl IntoMessages) -> ! {
        self.log(Level::Fatal, messages);
        std::process::exit(1)
    }

    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(args.to_string())
    }

    /// Emit at `Panic`, then panic with the messages as payload.
    ///
    /// The payload is the `Vec<String>` of messages, so it can be recovered
    /// with `downcast_ref::<Vec<String>>()` from `catch_unwind`.
    pub fn panic(&self, messages: impl IntoMessages) -> ! {
        let messages = messages.into_messages();
        self.log(Level::Panic, messages.clone());
        std::panic::panic_any(messages)
    }

    pub fn panic_fmt(&self, args: fmt::Arguments<'_>) -> ! {
        self.panic(args.to_string())
    }

    /// New logger sharing this logger's stream and tags.
    ///
    /// The copy starts at the default `Info` threshold, whatever the
    /// threshold of `self` is.
    #[must_use]
    pub fn copy(&self) -> Logger {
        let copy = Logger::new();
        copy.with_stream(self.stream());
        Logger {
            tags: self.tags.clone(),
            ..copy
        }
    }

    #[must_use]
    pub fn with_tag(&self, key: impl Into<String>, value: impl Into<String>) -> Logger {
        let mut derived = self.copy();
        derived.tags.insert(key.into(), value.into());
        derived
    }

    #[must_use]
    pub fn with_tags<K, V>(&self, tags: impl IntoIterator<Item = (K, V)>) -> Logger
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut derived = self.copy();
        derived
            .tags
            .extend(tags.into_iter().map(|(k, v)| (k.into(), v.into())));
        derived
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_event_stream::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let stream = Arc::new(SyncStream::new(&Context::background(), 16));
    /// let logger = Logger::builder()
    ///     .level(Level::Debug)
    ///     .tag("service", "api")
    ///     .stream(stream.clone())
    ///     .build();
    ///
    /// logger.trace("request received");
    /// let event = stream.get().recv().unwrap();
    /// assert_eq!(event.tag("service"), Some("api"));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Client for Logger {
    fn with_stream(&self, stream: Arc<dyn Stream>) {
        *self.stream.lock() = stream;
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.log_level())
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    level: Level,
    tags: HashMap<String, String>,
    stream: Option<Arc<dyn Stream>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            tags: HashMap::new(),
            stream: None,
        }
    }

    /// Set the initial threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the initial threshold from its name, e.g. a config value
    pub fn level_name(self, name: &str) -> Result<Self> {
        Ok(self.level(parse_level(name)?))
    }

    #[must_use = "builder methods return a new value"]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tags<K, V>(mut self, tags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.tags
            .extend(tags.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a stream; without one the logger uses [`NoopStream`]
    #[must_use = "builder methods return a new value"]
    pub fn stream(mut self, stream: Arc<dyn Stream>) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger {
            tags: self.tags,
            ..Logger::new()
        };
        logger.set_log_level(self.level);
        if let Some(stream) = self.stream {
            logger.with_stream(stream);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
